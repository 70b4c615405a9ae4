use super::*;
use shared::domain::{Clinic, ClinicAddress, PractitionerId, Speciality};

fn practitioner(id: &str, name: &str, fees: &str, experience: &str, specialities: &[&str]) -> Practitioner {
    Practitioner {
        id: PractitionerId(id.to_string()),
        name: name.to_string(),
        initials: name.chars().next().map(String::from).unwrap_or_default(),
        photo: None,
        experience: experience.to_string(),
        fees: fees.to_string(),
        specialities: specialities
            .iter()
            .map(|name| Speciality {
                name: name.to_string(),
            })
            .collect(),
        clinic: None,
        languages: Vec::new(),
    }
}

fn with_clinic(mut practitioner: Practitioner, clinic: &str) -> Practitioner {
    practitioner.clinic = Some(Clinic {
        name: clinic.to_string(),
        address: ClinicAddress::default(),
    });
    practitioner
}

fn scenario() -> Vec<Practitioner> {
    vec![
        practitioner("a", "Dr. A", "₹300", "5 Years", &["Dentist"]),
        practitioner("b", "Dr. B", "₹100", "10 Years", &["Cardiologist"]),
    ]
}

fn names(list: &[&Practitioner]) -> Vec<String> {
    list.iter().map(|p| p.name.clone()).collect()
}

fn state_with(query: &str, selected: &[&str], sort: SortKey) -> FilterState {
    let mut state = FilterState::default();
    state.set_query(query);
    for category in selected {
        state.toggle_category(category);
    }
    state.set_sort(sort);
    state
}

#[test]
fn leading_integer_takes_first_digit_run() {
    assert_eq!(leading_integer("₹500"), 500);
    assert_eq!(leading_integer("₹ 1,500"), 1);
    assert_eq!(leading_integer("12 Years of experience"), 12);
    assert_eq!(leading_integer("Consultation 300 / follow-up 200"), 300);
    assert_eq!(leading_integer("Experience not listed"), 0);
    assert_eq!(leading_integer(""), 0);
    assert_eq!(leading_integer("99999999999999999999999 years"), u64::MAX);
}

#[test]
fn scenario_sorts_by_price_ascending() {
    let records = scenario();
    let result = filter_and_sort(&records, &state_with("", &[], SortKey::FeeAscending));
    assert_eq!(names(&result), ["Dr. B", "Dr. A"]);
}

#[test]
fn scenario_sorts_by_experience_descending() {
    let records = scenario();
    let result = filter_and_sort(&records, &state_with("", &[], SortKey::ExperienceDescending));
    assert_eq!(names(&result), ["Dr. B", "Dr. A"]);
}

#[test]
fn scenario_query_matches_category_case_insensitively() {
    let records = scenario();
    let result = filter_and_sort(&records, &state_with("dent", &[], SortKey::FeeAscending));
    assert_eq!(names(&result), ["Dr. A"]);
}

#[test]
fn scenario_category_selection_keeps_only_tagged_records() {
    let records = scenario();
    let result = filter_and_sort(
        &records,
        &state_with("", &["Cardiologist"], SortKey::FeeAscending),
    );
    assert_eq!(names(&result), ["Dr. B"]);
}

#[test]
fn query_absent_everywhere_yields_empty_result() {
    let records = scenario();
    let result = filter_and_sort(&records, &state_with("zzz-nothing", &[], SortKey::FeeAscending));
    assert!(result.is_empty());
}

#[test]
fn query_matches_name_and_clinic_name() {
    let records = vec![
        practitioner("a", "Dr. Ravi Kumar", "₹200", "3 Years", &["ENT"]),
        with_clinic(
            practitioner("b", "Dr. Sana", "₹400", "8 Years", &["Pediatrician"]),
            "Rainbow Children's Hospital",
        ),
        practitioner("c", "Dr. Lee", "₹300", "1 Year", &[]),
    ];

    let by_name = filter_and_sort(&records, &state_with("RAVI", &[], SortKey::FeeAscending));
    assert_eq!(names(&by_name), ["Dr. Ravi Kumar"]);

    let by_clinic = filter_and_sort(&records, &state_with("rainbow", &[], SortKey::FeeAscending));
    assert_eq!(names(&by_clinic), ["Dr. Sana"]);
}

#[test]
fn empty_query_and_no_selection_keep_every_record() {
    let records = scenario();
    let result = filter_and_sort(&records, &FilterState::default());
    assert_eq!(result.len(), records.len());
}

#[test]
fn multiple_selected_categories_form_a_union() {
    let records = vec![
        practitioner("a", "Dr. A", "₹300", "5 Years", &["Dentist"]),
        practitioner("b", "Dr. B", "₹100", "10 Years", &["Cardiologist"]),
        practitioner("c", "Dr. C", "₹200", "2 Years", &["Dermatologist"]),
        practitioner("d", "Dr. D", "₹250", "7 Years", &["Dentist", "Cardiologist"]),
    ];
    let result = filter_and_sort(
        &records,
        &state_with("", &["Dentist", "Cardiologist"], SortKey::FeeAscending),
    );
    assert_eq!(names(&result), ["Dr. B", "Dr. D", "Dr. A"]);
}

#[test]
fn search_and_category_stages_compose() {
    let records = vec![
        practitioner("a", "Dr. Anil", "₹300", "5 Years", &["Dentist"]),
        practitioner("b", "Dr. Anita", "₹100", "10 Years", &["Cardiologist"]),
        practitioner("c", "Dr. Bose", "₹200", "2 Years", &["Dentist"]),
    ];
    let result = filter_and_sort(&records, &state_with("ani", &["Dentist"], SortKey::FeeAscending));
    assert_eq!(names(&result), ["Dr. Anil"]);
}

#[test]
fn fee_sort_is_non_decreasing_and_experience_sort_non_increasing() {
    let records = vec![
        practitioner("a", "A", "₹800", "Experience not listed", &[]),
        practitioner("b", "B", "Fee on request", "22 Years", &[]),
        practitioner("c", "C", "₹150", "3 Years", &[]),
        practitioner("d", "D", "₹1200", "15 Years", &[]),
        practitioner("e", "E", "₹150", "9 Years", &[]),
    ];

    let by_fee = filter_and_sort(&records, &state_with("", &[], SortKey::FeeAscending));
    let fees: Vec<u64> = by_fee.iter().map(|p| leading_integer(&p.fees)).collect();
    assert!(fees.windows(2).all(|pair| pair[0] <= pair[1]), "{fees:?}");
    assert_eq!(by_fee[0].name, "B");

    let by_experience = filter_and_sort(&records, &state_with("", &[], SortKey::ExperienceDescending));
    let years: Vec<u64> = by_experience
        .iter()
        .map(|p| leading_integer(&p.experience))
        .collect();
    assert!(years.windows(2).all(|pair| pair[0] >= pair[1]), "{years:?}");
    assert_eq!(by_experience.last().map(|p| p.name.as_str()), Some("A"));
}

#[test]
fn ties_keep_listing_order() {
    let records = vec![
        practitioner("a", "First", "₹500", "4 Years", &[]),
        practitioner("b", "Second", "₹500", "4 Years", &[]),
        practitioner("c", "Third", "₹500", "4 Years", &[]),
    ];
    let by_fee = filter_and_sort(&records, &state_with("", &[], SortKey::FeeAscending));
    assert_eq!(names(&by_fee), ["First", "Second", "Third"]);
    let by_experience = filter_and_sort(&records, &state_with("", &[], SortKey::ExperienceDescending));
    assert_eq!(names(&by_experience), ["First", "Second", "Third"]);
}

#[test]
fn pipeline_leaves_input_untouched() {
    let records = scenario();
    let before = records.clone();
    let _ = filter_and_sort(&records, &state_with("dr", &["Dentist"], SortKey::ExperienceDescending));
    assert_eq!(records, before);
}

#[test]
fn toggling_a_category_twice_deselects_it() {
    let mut state = FilterState::default();
    state.toggle_category("Dentist");
    assert!(state.is_selected("Dentist"));
    state.toggle_category("Dentist");
    assert!(!state.is_selected("Dentist"));
    assert!(state.selected().is_empty());
}

#[test]
fn clear_all_resets_every_input() {
    let mut state = state_with("cardio", &["Cardiologist", "Dentist"], SortKey::ExperienceDescending);
    state.clear_all();
    assert_eq!(state.query(), "");
    assert!(state.selected().is_empty());
    assert_eq!(state.sort(), SortKey::FeeAscending);
    assert_eq!(state, FilterState::default());

    state.clear_all();
    assert_eq!(state, FilterState::default());
}

#[test]
fn memo_recomputes_only_when_inputs_change() {
    let records: Arc<[Practitioner]> = scenario().into();
    let mut memo = ListingMemo::new();
    let mut state = FilterState::default();

    assert_eq!(names(&memo.get(&records, &state)), ["Dr. B", "Dr. A"]);
    let _ = memo.get(&records, &state);
    assert_eq!(memo.recomputations(), 1);

    state.set_sort(SortKey::ExperienceDescending);
    let _ = memo.get(&records, &state);
    assert_eq!(memo.recomputations(), 2);

    state.set_query("dent");
    assert_eq!(names(&memo.get(&records, &state)), ["Dr. A"]);
    assert_eq!(memo.recomputations(), 3);

    let reloaded: Arc<[Practitioner]> = scenario().into();
    let _ = memo.get(&reloaded, &state);
    assert_eq!(memo.recomputations(), 4);
}
