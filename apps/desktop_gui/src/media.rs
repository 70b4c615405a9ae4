//! Practitioner photo decoding for avatar thumbnails.

pub const AVATAR_THUMBNAIL_PX: u32 = 160;

#[derive(Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_photo(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = dynamic
        .thumbnail(AVATAR_THUMBNAIL_PX, AVATAR_THUMBNAIL_PX)
        .to_rgba8();
    Ok(PreviewImage {
        width: resized.width() as usize,
        height: resized.height() as usize,
        rgba: resized.into_raw(),
    })
}
