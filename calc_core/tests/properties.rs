//! Property tests across the calculators.

use calc_core::calculations::break_even::{self, BreakEvenInput};
use calc_core::calculations::eoq::{self, EoqInput};
use calc_core::calculations::linear_program::{self, Constraint, Direction, LpInput, LpStatus};
use calc_core::calculations::npv::{self, compute_npv, IrrConfig, NpvInput};
use calc_core::calculations::regression::{self, RegressionInput};
use calc_core::CalculationItem;
use proptest::prelude::*;

proptest! {
    #[test]
    fn eoq_is_a_local_minimum(
        demand in 10.0_f64..1e6,
        order_cost in 1.0_f64..1e4,
        holding_cost in 0.1_f64..1e3,
        bump in 0.01_f64..0.5,
    ) {
        let input = EoqInput { annual_demand: demand, order_cost, holding_cost };
        let result = eoq::calculate(&input).unwrap();
        let q = result.order_quantity;

        let tc = input.total_cost_at(q);
        prop_assert!(input.total_cost_at(q * (1.0 + bump)) >= tc * (1.0 - 1e-12));
        prop_assert!(input.total_cost_at(q * (1.0 - bump)) >= tc * (1.0 - 1e-12));

        // Ordering and holding cost are equal at the optimum
        let rel = (result.annual_ordering_cost - result.annual_holding_cost).abs() / tc;
        prop_assert!(
            rel < 1e-9,
            "ordering {} vs holding {}",
            result.annual_ordering_cost,
            result.annual_holding_cost
        );
    }

    #[test]
    fn break_even_cost_equals_revenue(
        fixed_cost in 0.0_f64..1e7,
        variable_cost in 0.0_f64..1e4,
        margin in 0.01_f64..1e4,
    ) {
        let input = BreakEvenInput {
            fixed_cost,
            variable_cost,
            price: variable_cost + margin,
            target_units: None,
        };
        let result = break_even::calculate(&input).unwrap();
        let cost = fixed_cost + variable_cost * result.unit_bep;
        let revenue = input.price * result.unit_bep;
        prop_assert!((cost - revenue).abs() <= 1e-9 * revenue.max(1.0));
        prop_assert!((result.revenue_bep - revenue).abs() <= 1e-9 * revenue.max(1.0));
    }

    #[test]
    fn npv_decreases_with_rate_for_positive_flows(
        investment in 1.0_f64..1e6,
        flows in proptest::collection::vec(1.0_f64..1e5, 1..=20),
        r1 in 0.01_f64..0.5,
        gap in 0.01_f64..0.5,
    ) {
        let r2 = r1 + gap;
        prop_assert!(compute_npv(investment, r1, &flows) > compute_npv(investment, r2, &flows));
    }

    #[test]
    fn converged_irr_zeroes_npv(
        investment in 100.0_f64..1e6,
        periods in 1_usize..=10,
        irr_target in 0.05_f64..0.8,
    ) {
        // Level annuity whose true IRR is irr_target
        let annuity_factor = (1.0 - (1.0 + irr_target).powi(-(periods as i32))) / irr_target;
        let flows = vec![investment / annuity_factor; periods];
        let config = IrrConfig { tolerance: 1e-6, ..IrrConfig::default() };

        let estimate = npv::compute_irr(investment, &flows, &config).unwrap();
        if estimate.converged {
            prop_assert!(compute_npv(investment, estimate.rate, &flows).abs() < 1e-6);
        }
        prop_assert!((estimate.rate - irr_target).abs() < 1e-6);
    }

    #[test]
    fn regression_recovers_exact_line(
        intercept in -1e3_f64..1e3,
        slope in prop_oneof![-50.0_f64..-0.5, 0.5_f64..50.0],
        n in 3_usize..=20,
        spacing in 0.5_f64..10.0,
    ) {
        let xs: Vec<f64> = (0..n).map(|i| i as f64 * spacing).collect();
        let ys: Vec<f64> = xs.iter().map(|x| intercept + slope * x).collect();
        let fit = regression::fit(&xs, &ys).unwrap();

        prop_assert!((fit.slope - slope).abs() < 1e-6 * slope.abs().max(1.0));
        prop_assert!((fit.intercept - intercept).abs() < 1e-6 * intercept.abs().max(1.0) + 1e-6);
        prop_assert!((fit.r.abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn regression_r_squared_bounded(
        data in proptest::collection::vec(-1e3_f64..1e3, 3..=20)
            .prop_flat_map(|x| {
                let n = x.len();
                (Just(x), proptest::collection::vec(-1e3_f64..1e3, n..=n))
            })
    ) {
        let (xs, ys) = data;
        if let Ok(fit) = regression::fit(&xs, &ys) {
            prop_assert!((0.0..=1.0).contains(&fit.r_squared), "R² = {}", fit.r_squared);
        }
    }

    #[test]
    fn lp_optimum_is_feasible_and_best(
        c1 in 0.5_f64..10.0,
        c2 in 0.5_f64..10.0,
        limits in proptest::collection::vec((0.5_f64..5.0, 0.5_f64..5.0, 5.0_f64..50.0), 1..=5),
    ) {
        // Positive coefficients bound the region inside the first quadrant
        let constraints: Vec<Constraint> = limits
            .iter()
            .map(|&(a1, a2, b)| Constraint::new(a1, a2, b))
            .collect();
        let input = LpInput::new(c1, c2, Direction::Maximize, constraints.clone());
        let solution = linear_program::solve(&input).unwrap();

        prop_assert_eq!(solution.status, LpStatus::Optimal);
        let optimum = solution.optimum.unwrap();
        for c in &constraints {
            prop_assert!(c.is_satisfied(optimum.x1, optimum.x2));
        }
        for v in &solution.vertices {
            prop_assert!(
                v.objective <= optimum.objective + 1e-9 * optimum.objective.abs().max(1.0)
            );
        }
    }

    #[test]
    fn calculations_are_idempotent(
        investment in 1.0_f64..1e6,
        rate in 0.01_f64..1.0,
        flows in proptest::collection::vec(1.0_f64..1e5, 1..=20),
    ) {
        let item = CalculationItem::NpvIrr(NpvInput::new(investment, rate, flows));
        prop_assert_eq!(item.calculate().unwrap(), item.calculate().unwrap());
    }
}

#[test]
fn regression_input_from_json_round_trips_through_dispatch() {
    let json = r#"{
        "method": "Regression",
        "xs": [1, 2, 3, 4, 5],
        "ys": [2, 4, 5, 4, 5],
        "predict_x": 6
    }"#;
    let item: CalculationItem = serde_json::from_str(json).unwrap();
    let direct = regression::calculate(&RegressionInput {
        xs: vec![1.0, 2.0, 3.0, 4.0, 5.0],
        ys: vec![2.0, 4.0, 5.0, 4.0, 5.0],
        predict_x: Some(6.0),
    })
    .unwrap();

    match item.calculate().unwrap() {
        calc_core::CalculationOutput::Regression(result) => assert_eq!(result, direct),
        other => panic!("Expected regression output, got {:?}", other),
    }
}
