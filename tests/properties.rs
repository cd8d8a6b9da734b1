use arenasim::core::{time_to_collision, Contact};
use arenasim::{Entity, SimConfig};
use glam::DVec2;
use proptest::prelude::*;

prop_compose! {
    fn arb_body()(
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
        vx in -100.0f64..100.0,
        vy in -100.0f64..100.0,
        r in 10.0f64..40.0
    ) -> (DVec2, DVec2, f64) {
        (DVec2::new(x, y), DVec2::new(vx, vy), r)
    }
}

fn ship((pos, vel, r): (DVec2, DVec2, f64)) -> Entity {
    Entity::ship(pos, vel, r, 0.0, &SimConfig::default()).expect("valid ship")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prediction_is_symmetric(a in arb_body(), b in arb_body()) {
        let (ea, eb) = (ship(a), ship(b));
        match (time_to_collision(&ea, &eb), time_to_collision(&eb, &ea)) {
            (Contact::At(t1), Contact::At(t2)) => {
                prop_assert!((t1 - t2).abs() <= 1e-9 * t1.max(1.0), "{t1} vs {t2}");
            }
            (x, y) => prop_assert_eq!(x, y),
        }
    }

    #[test]
    fn equal_velocities_never_collide(
        a in arb_body(),
        offset in 100.0f64..400.0,
        angle in 0.0f64..std::f64::consts::TAU
    ) {
        let (pos, vel, r) = a;
        let ea = ship(a);
        let eb = ship((pos + DVec2::from_angle(angle) * offset, vel, r));
        prop_assert_eq!(time_to_collision(&ea, &eb), Contact::Never);
    }

    /// At the predicted time the two rims touch.
    #[test]
    fn predicted_time_is_a_contact(a in arb_body(), b in arb_body()) {
        let (mut ea, mut eb) = (ship(a), ship(b));
        let d0 = (eb.position() - ea.position()).length_squared();
        if let Contact::At(t) = time_to_collision(&ea, &eb) {
            prop_assume!(t < 100.0);
            ea.advance(t).expect("finite");
            eb.advance(t).expect("finite");
            let s = ea.radius() + eb.radius();
            let miss = (eb.position() - ea.position()).length_squared() - s * s;
            prop_assert!(miss.abs() <= 1e-6 * (1.0 + d0), "miss {miss} at t = {t}");
        }
    }
}
