// Copyright (c) 2018-2022  Ministerio de Fomento
//                          Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

// Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>,
//            Daniel Jiménez González <dani@ietcc.csic.es>,
//            Marta Sorribes Gil <msorribes@ietcc.csic.es>

use pretty_assertions::assert_eq;

use acsdim::types::*;
use acsdim::*;

fn tank_800() -> TankParams {
    TankParams {
        volume_l: 800.0,
        t_init_c: 55.0,
        t_set_c: 55.0,
        t_cold_c: 10.0,
        t_min_c: 45.0,
        dt_s: 60,
    }
}

fn loss_02() -> LossInput {
    LossInput {
        loss_kw: Some(0.2),
        ..Default::default()
    }
}

#[test]
fn violation_is_monotone_with_power() {
    // más aporte solo puede reducir o mantener el incumplimiento
    let tank = tank_800();
    let demand = reference_daily_profile();
    let model = MixedTank {
        tank: &tank,
        demand_lpm: &demand,
        loss_kw: 0.2,
        hysteresis_c: 0.0,
    };
    let violations: Vec<f64> = [0.0, 50.0, 100.0, 200.0, 400.0]
        .iter()
        .map(|p| model.simulate(*p).unwrap().violation_min)
        .collect();
    for w in violations.windows(2) {
        assert!(w[1] <= w[0]);
    }
    assert!(violations[0] > 0.0);
}

#[test]
fn loss_families_are_interchangeable() {
    // UA·ΔT = 100 W/K · 20 K = 2 kW debe dar el mismo resultado que 2 kW directos
    let tank = tank_800();
    let demand = reference_daily_profile();
    let direct = LossInput {
        loss_kw: Some(2.0),
        ..Default::default()
    };
    let by_ua = LossInput {
        ua_w_per_k: Some(100.0),
        delta_t_k: Some(20.0),
        ..Default::default()
    };
    let search = SearchParams::default();
    let res_direct =
        compare_models(&tank, &demand, &direct, 0.0, None, None, None, &search).unwrap();
    let res_ua = compare_models(&tank, &demand, &by_ua, 0.0, None, None, None, &search).unwrap();
    assert_eq!(
        format!("{:.3}", res_direct.mixed.p_ord_kw),
        format!("{:.3}", res_ua.mixed.p_ord_kw)
    );
    assert_eq!(
        format!("{:.3}", res_direct.layered.p_ord_kw),
        format!("{:.3}", res_ua.layered.p_ord_kw)
    );
}

#[test]
fn degenerate_stratification_closes_the_gap() {
    // zona caliente casi total y mezcla inmediata: el estratificado tiende al mezclado
    let tank = tank_800();
    let demand = reference_daily_profile();
    let layered = LayeredParams {
        hot_fraction: 0.95,
        mixing_tau_s: 1.0,
        losses_split: LossSplit::ByVolume,
    };
    let res = compare_models(
        &tank,
        &demand,
        &loss_02(),
        0.0,
        Some(&layered),
        None,
        None,
        &SearchParams::default(),
    )
    .unwrap();
    assert!(res.delta_p_kw >= 0.0);
    assert!(res.delta_p_pct < 10.0);
}

#[test]
fn reference_scenario_recommends_stratified_model() {
    // perfil con picos cortos e intensos y depósito grande: diferencia relevante
    let tank = tank_800();
    let demand = reference_daily_profile();
    let cost = CostParams {
        cost_kw_month: Some(50.0),
        cost_kw_year: None,
        horizon_years: 10,
    };
    let res = compare_models(
        &tank,
        &demand,
        &loss_02(),
        0.0,
        None,
        None,
        Some(&cost),
        &SearchParams::default(),
    )
    .unwrap();

    assert!(res.delta_p_kw > 0.0);
    assert!(res.recommendation.level == Level::B || res.recommendation.level == Level::C);
    // la decisión adopta la potencia del modelo estratificado
    assert_eq!(res.decision.p_ord_final_kw, res.layered.p_ord_kw);
    assert_eq!(DecisionBasis::TechnicalFinancial, res.decision.basis);
    assert!(res.financial.extra_cost_year > 0.0);
    assert!(
        (res.financial.extra_cost_month * 12.0 - res.financial.extra_cost_year).abs() < 1e-6
    );
    // ambos modelos cumplen el confort a su potencia mínima
    assert!(res.mixed.violation_min <= 0.0);
    assert!(res.layered.violation_min <= 0.0);
}

#[test]
fn violation_budget_lowers_the_minimal_power() {
    let tank = tank_800();
    let demand = reference_daily_profile();
    let search = SearchParams::default();
    let strict = compare_models(&tank, &demand, &loss_02(), 0.0, None, None, None, &search)
        .unwrap();
    let relaxed = compare_models(&tank, &demand, &loss_02(), 10.0, None, None, None, &search)
        .unwrap();
    assert!(relaxed.mixed.p_ord_kw <= strict.mixed.p_ord_kw);
    assert!(relaxed.layered.p_ord_kw <= strict.layered.p_ord_kw);
    assert!(relaxed.mixed.violation_min <= 10.0);
}

#[test]
fn comparison_serializes_to_json() {
    let tank = tank_800();
    let demand = reference_daily_profile();
    let res = compare_models(
        &tank,
        &demand,
        &loss_02(),
        0.0,
        None,
        None,
        None,
        &SearchParams::default(),
    )
    .unwrap();
    let json = serde_json::to_string(&res).unwrap();
    let back: ComparisonResult = serde_json::from_str(&json).unwrap();
    assert_eq!(
        format!("{:.3}", res.delta_p_kw),
        format!("{:.3}", back.delta_p_kw)
    );
    assert_eq!(res.recommendation.level, back.recommendation.level);
}
