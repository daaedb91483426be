use crxs_core::errors::CrxsError;
use crxs_core::{CmPoint, CoalescenceModel, Nucleus, Parametrization, Product};

#[test]
fn unknown_names_carry_the_accepted_set() {
    let err = Parametrization::from_name("KORSMEIER_IV").unwrap_err();
    assert!(matches!(err, CrxsError::UnknownEnumName(_)));
    assert_eq!(err.code(), "unknown-name");
    assert_eq!(err.info().context["name"], "KORSMEIER_IV");
    let hint = err.info().hint.as_deref().unwrap();
    assert!(hint.contains("KORSMEIER_II") && hint.contains("DI_MAURO_I"));

    let err = "ALPHA".parse::<Product>().unwrap_err();
    assert_eq!(err.info().context["kind"], "product");
}

#[test]
fn unknown_ids_name_the_id() {
    let err = CoalescenceModel::from_id(9).unwrap_err();
    assert!(matches!(err, CrxsError::UnknownEnumName(_)));
    assert_eq!(err.code(), "unknown-id");
    assert_eq!(err.info().context["id"], "9");
}

#[test]
fn nucleus_errors_report_both_counts() {
    let err = Nucleus::new(2, 3).unwrap_err();
    assert!(matches!(err, CrxsError::InvalidNucleus(_)));
    assert_eq!(err.info().context["A"], "2");
    assert_eq!(err.info().context["N"], "3");
}

#[test]
fn malformed_points_are_kinematic_errors() {
    assert_eq!(CmPoint::new(-1.0, 0.0, 0.1).unwrap_err().code(), "invalid-s");
    assert_eq!(CmPoint::new(100.0, 1.5, 0.1).unwrap_err().code(), "invalid-x-f");
    let err = CmPoint::new(100.0, 0.0, -0.1).unwrap_err();
    assert!(matches!(err, CrxsError::Kinematic(_)));
    assert_eq!(err.code(), "invalid-p-t");
}

#[test]
fn display_includes_context_and_hint() {
    let rendered = Parametrization::from_name("WINKLR").unwrap_err().to_string();
    assert!(rendered.starts_with("unknown enum name: `WINKLR` is not a known parametrization"));
    assert!(rendered.contains("(code: unknown-name)"));
    assert!(rendered.contains("name=WINKLR"));
    assert!(rendered.contains("| hint: expected one of: "));
}

#[test]
fn errors_round_trip_json() {
    let err = Nucleus::new(0, 0).unwrap_err();
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"InvalidNucleus\""));
    assert!(json.contains("\"code\":\"invalid-nucleus\""));
    let decoded: CrxsError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
