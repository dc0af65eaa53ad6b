use deltav_planner::rocket::tsiolkovsky;

#[test]
fn reference_burn_matches_published_value() {
    // Isp 300 s, mass halved: ~2039.3 m/s.
    let dv = tsiolkovsky(300.0, 2.0, 1.0);
    assert!((dv - 2039.3).abs() < 1.0, "dv = {}", dv);
}

#[test]
fn delta_v_is_monotonic_in_mass_ratio() {
    let mut previous = 0.0;
    for mf in [1.9, 1.5, 1.0, 0.5, 0.1] {
        let dv = tsiolkovsky(300.0, 2.0, mf);
        assert!(dv > previous, "dv = {} at mf = {}", dv, mf);
        previous = dv;
    }
}

#[test]
fn delta_v_scales_with_impulse() {
    let low = tsiolkovsky(100.0, 2.0, 1.0);
    let high = tsiolkovsky(800.0, 2.0, 1.0);
    assert!((high / low - 8.0).abs() < 1e-12);
}

#[test]
#[should_panic]
fn mass_must_strictly_decrease() {
    tsiolkovsky(300.0, 2.0, 2.0);
}

#[test]
#[should_panic]
fn final_mass_must_stay_positive() {
    tsiolkovsky(300.0, 2.0, 0.0);
}

#[test]
#[should_panic]
fn impulse_must_be_positive() {
    tsiolkovsky(0.0, 2.0, 1.0);
}
