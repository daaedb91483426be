use crxs_core::constants::NOMINAL_P_COAL;
use crxs_core::{s_from_kinetic, CmPoint, CoalescenceModel};
use crxs_xs::{CoalescenceMomentum, CoalescenceOpts, FixedP0, ModelMomentum, VanDoetinchem};
use proptest::prelude::*;

fn grid() -> Vec<CmPoint> {
    let mut points = Vec::new();
    for tn in [10.0, 50.0, 200.0, 1_000.0, 1e4, 1e5, 1e6] {
        for x_f in [-0.5, 0.0, 0.3] {
            for p_t in [0.0, 0.4, 1.5] {
                points.push(CmPoint::new(s_from_kinetic(tn), x_f, p_t).unwrap());
            }
        }
    }
    points
}

#[test]
fn fixed_model_is_constant() {
    let model = FixedP0::default();
    for point in grid() {
        assert_eq!(model.p_coal(&point), NOMINAL_P_COAL);
    }
}

#[test]
fn energy_dependent_model_is_positive_and_rising() {
    let model = VanDoetinchem::default();
    let mut previous = 0.0;
    for tn in [10.0, 30.0, 100.0, 300.0, 1e3, 1e4, 1e5, 1e6] {
        let point = CmPoint::new(s_from_kinetic(tn), 0.0, 0.3).unwrap();
        let p = model.p_coal(&point);
        assert!(p > 0.0 && p < model.a, "tn={tn}: {p}");
        assert!(p > previous);
        previous = p;
    }
}

#[test]
fn energy_dependent_model_approaches_its_plateau() {
    let model = VanDoetinchem::default();
    let point = CmPoint::new(s_from_kinetic(1e7), 0.0, 0.0).unwrap();
    assert!((model.p_coal(&point) - model.a).abs() < 1e-4);
}

#[test]
fn selection_follows_the_model_identifier() {
    let opts = CoalescenceOpts::default();
    let fixed = opts.momentum_model(CoalescenceModel::FixedP0);
    let dynamic = opts.momentum_model(CoalescenceModel::EnergyDepVanDoetinchem);
    assert_eq!(fixed.model(), CoalescenceModel::FixedP0);
    assert_eq!(dynamic.model(), CoalescenceModel::EnergyDepVanDoetinchem);
    assert!(matches!(dynamic, ModelMomentum::EnergyDependent(_)));
    let point = CmPoint::new(s_from_kinetic(100.0), 0.0, 0.0).unwrap();
    assert_eq!(fixed.p_coal(&point), NOMINAL_P_COAL);
    assert_eq!(dynamic.p_coal(&point), VanDoetinchem::default().p_coal(&point));
}

proptest! {
    #[test]
    fn energy_dependent_model_is_continuous(log_tn in 1.0f64..14.0) {
        let model = VanDoetinchem::default();
        let tn = log_tn.exp();
        let here = model.p_coal(&CmPoint::new(s_from_kinetic(tn), 0.0, 0.0).unwrap());
        let next = model.p_coal(&CmPoint::new(s_from_kinetic(tn * 1.000_001), 0.0, 0.0).unwrap());
        prop_assert!(here > 0.0);
        prop_assert!((next - here).abs() <= 1e-6 * model.a);
    }

    #[test]
    fn energy_dependent_model_ignores_product_momentum(
        tn in 10.0f64..1e5,
        x_f in -0.9f64..0.9,
        p_t in 0.0f64..3.0,
    ) {
        let model = VanDoetinchem::default();
        let s = s_from_kinetic(tn);
        let at_rest = model.p_coal(&CmPoint::new(s, 0.0, 0.0).unwrap());
        let moving = model.p_coal(&CmPoint::new(s, x_f, p_t).unwrap());
        prop_assert_eq!(at_rest, moving);
    }
}
