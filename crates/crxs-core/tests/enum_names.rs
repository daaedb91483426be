use crxs_core::{CoalescenceModel, CrxsError, Parametrization, Product};
use proptest::prelude::*;

const PARAMETRIZATIONS: [&str; 5] = [
    "KORSMEIER_I",
    "KORSMEIER_II",
    "WINKLER",
    "DI_MAURO_I",
    "DI_MAURO_II",
];
const PRODUCTS: [&str; 3] = ["P_BAR", "D_BAR", "HE_BAR"];
const COALESCENCE: [&str; 2] = ["FIXED_P0", "ENERGY_DEP__VAN_DOETINCHEM"];

#[test]
fn documented_identifiers() {
    for (idx, name) in PARAMETRIZATIONS.iter().enumerate() {
        let parsed = Parametrization::from_name(name).expect("known parametrization");
        assert_eq!(parsed.id() as usize, idx + 1);
        assert_eq!(parsed.name(), *name);
        assert_eq!(Parametrization::from_id(parsed.id()).unwrap(), parsed);
    }
    for (idx, name) in PRODUCTS.iter().enumerate() {
        let parsed: Product = name.parse().expect("known product");
        assert_eq!(parsed.id() as usize, idx + 1);
        assert_eq!(parsed.to_string(), *name);
    }
    for (idx, name) in COALESCENCE.iter().enumerate() {
        let parsed = CoalescenceModel::from_name(name).expect("known model");
        assert_eq!(parsed.id() as usize, idx + 1);
    }
    assert_eq!(Parametrization::from_name("KORSMEIER_II").unwrap().id(), 2);
}

#[test]
fn documented_defaults() {
    assert_eq!(Parametrization::default(), Parametrization::KorsmeierII);
    assert_eq!(
        CoalescenceModel::default(),
        CoalescenceModel::EnergyDepVanDoetinchem
    );
}

#[test]
fn no_case_normalisation() {
    let err = Parametrization::from_name("korsmeier_ii").unwrap_err();
    assert!(matches!(err, CrxsError::UnknownEnumName(_)));
    assert_eq!(err.info().context["name"], "korsmeier_ii");
    assert!(Product::from_name(" P_BAR").is_err());
    assert!(CoalescenceModel::from_name("FIXED").is_err());
    assert!(Parametrization::from_id(0).is_err());
    assert!(Product::from_id(4).is_err());
}

#[test]
fn secondaries_restricted_to_three_families() {
    let supported: Vec<_> = Parametrization::ALL
        .into_iter()
        .filter(|p| p.supports_secondaries())
        .collect();
    assert_eq!(
        supported,
        vec![
            Parametrization::KorsmeierI,
            Parametrization::KorsmeierII,
            Parametrization::Winkler
        ]
    );
}

#[test]
fn serde_uses_canonical_names() {
    let json = serde_json::to_string(&Parametrization::DiMauroII).unwrap();
    assert_eq!(json, "\"DI_MAURO_II\"");
    let model: CoalescenceModel = serde_json::from_str("\"ENERGY_DEP__VAN_DOETINCHEM\"").unwrap();
    assert_eq!(model, CoalescenceModel::EnergyDepVanDoetinchem);
    assert!(serde_json::from_str::<Product>("\"HE4_BAR\"").is_err());
}

proptest! {
    #[test]
    fn unknown_names_are_rejected(name in "[A-Za-z_0-9]{0,30}") {
        prop_assume!(!PARAMETRIZATIONS.contains(&name.as_str()));
        prop_assume!(!PRODUCTS.contains(&name.as_str()));
        prop_assume!(!COALESCENCE.contains(&name.as_str()));
        let is_unknown = |err: CrxsError| matches!(err, CrxsError::UnknownEnumName(_));
        prop_assert!(is_unknown(Parametrization::from_name(&name).unwrap_err()));
        prop_assert!(is_unknown(Product::from_name(&name).unwrap_err()));
        prop_assert!(is_unknown(CoalescenceModel::from_name(&name).unwrap_err()));
    }
}
