use shuttle_control::{
    aggregate_inputs, resolve_vehicle, AggregatedInput, ResolveOutcome, ShuttleInput, SimpleBody,
    ThrustDirection, ThrusterChange, ThrusterState, VehicleSpec,
};
use bevy_math::Vec2;

const DT: f32 = 1.0 / 60.0;

#[test]
fn idle_pilots_switch_off_a_burning_vehicle() {
    let spec = VehicleSpec::default();
    let mut body = SimpleBody::new(2000.0, 8000.0).with_velocity(Vec2::new(3.0, 4.0), 0.5);
    let mut thrusters = ThrusterState::default();

    let burn = Some(AggregatedInput {
        linear: Vec2::new(-1.0, 0.0),
        angular: 1.0,
        brake: 1.0,
        contributors: 1,
    });
    resolve_vehicle(&spec, burn, &mut body, &mut thrusters, &mut (), DT).unwrap();
    body.integrate(DT);
    assert!(thrusters.any_active());
    assert!(!body.sleeping_allowed);

    // Everyone still at their console, nobody touching anything.
    let idle = aggregate_inputs([ShuttleInput::ZERO, ShuttleInput::ZERO]);
    assert_eq!(idle, None);

    let before = body.clone();
    let mut changes = Vec::new();
    let outcome = resolve_vehicle(&spec, idle, &mut body, &mut thrusters, &mut changes, DT).unwrap();
    assert_eq!(outcome, ResolveOutcome::Unpiloted);
    assert!(!thrusters.any_active());
    assert!(body.sleeping_allowed);
    assert_eq!(body.force, Vec2::ZERO);
    assert_eq!(body.torque, 0.0);
    assert!(changes.contains(&ThrusterChange::Angular { active: false }));
    for change in &changes {
        assert!(
            matches!(change, ThrusterChange::Linear { active: false, .. } | ThrusterChange::Angular { active: false }),
            "unexpected {change:?}"
        );
    }

    // The body keeps coasting; the controller does not hold it in place.
    body.integrate(DT);
    assert_eq!(body.linear_velocity, before.linear_velocity);
}

#[test]
fn unpiloted_twice_reports_no_changes() {
    let spec = VehicleSpec::default();
    let mut body = SimpleBody::new(2000.0, 8000.0);
    let mut thrusters = ThrusterState::default();
    thrusters.set_direction(ThrustDirection::South, true, &mut ());

    let mut first = Vec::new();
    resolve_vehicle(&spec, None, &mut body, &mut thrusters, &mut first, DT).unwrap();
    assert_eq!(first, vec![ThrusterChange::Linear { direction: ThrustDirection::South, active: false }]);

    let mut second = Vec::new();
    resolve_vehicle(&spec, None, &mut body, &mut thrusters, &mut second, DT).unwrap();
    assert!(second.is_empty());
}
