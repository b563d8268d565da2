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

/*!
Comparación de modelos (model comparison)
=========================================

Punto de entrada del análisis: prelee la demanda, resuelve las pérdidas,
obtiene la potencia mínima de cada modelo de depósito, clasifica la
diferencia y compone la recomendación, el impacto financiero y la decisión
final en un agregado serializable único.

*/

use crate::demand::{demand_energy_and_pavg, profile_peak_metrics};
use crate::error::Result;
use crate::finance::{build_final_decision, financial_impact};
use crate::losses::resolve_loss_kw;
use crate::model::{LayeredTank, MixedTank};
use crate::recommend::{build_recommendation, engineering_commentary};
use crate::search::find_min_power;
use crate::types::{
    BarItem, ComparisonResult, CostParams, LayeredParams, LossInput, PlotSeries, SearchParams,
    TankParams, Thresholds,
};

/// Compara los dos modelos de depósito y compone el resultado completo
///
/// El orden de los pasos es fijo: prelectura de demanda, resolución de
/// pérdidas, búsqueda de potencia mínima (mezclado y estratificado),
/// clasificación, impacto financiero y decisión final.
///
/// Los parámetros opcionales no aportados toman sus valores de defecto. Sin
/// tarifas los costes resultan nulos, con mensaje explicativo en el informe.
///
/// # Errors
///
/// Propaga los errores de validación de entradas y el agotamiento de la
/// búsqueda si algún modelo no alcanza el confort hasta la potencia máxima.
pub fn compare_models(
    tank: &TankParams,
    demand_lpm: &[f64],
    loss: &LossInput,
    allowed_violation_min: f64,
    layered: Option<&LayeredParams>,
    thresholds: Option<&Thresholds>,
    cost: Option<&CostParams>,
    search: &SearchParams,
) -> Result<ComparisonResult> {
    tank.validate()?;
    search.validate()?;
    let layered_default = LayeredParams::default();
    let layered = layered.unwrap_or(&layered_default);
    layered.validate()?;
    let thresholds_default = Thresholds::default();
    let thr = thresholds.unwrap_or(&thresholds_default);
    let cost_default = CostParams::default();
    let cost = cost.unwrap_or(&cost_default);
    let cost_n = cost.normalized()?;

    // prelectura de la demanda y resolución de pérdidas
    let (e_acs_kwh, p_avg_kw) =
        demand_energy_and_pavg(demand_lpm, tank.dt_s, tank.t_cold_c, tank.t_set_c)?;
    let loss_kw = resolve_loss_kw(loss, p_avg_kw)?;

    // potencia mínima de cada modelo, con el mismo presupuesto de confort
    let mixed_model = MixedTank {
        tank,
        demand_lpm,
        loss_kw,
        hysteresis_c: 0.0,
    };
    let mixed = find_min_power(&mixed_model, allowed_violation_min, search)?;

    let layered_model = LayeredTank {
        tank,
        layered,
        demand_lpm,
        loss_kw,
        hysteresis_c: 0.0,
    };
    let layered_res = find_min_power(&layered_model, allowed_violation_min, search)?;

    let delta_p_kw = mixed.p_ord_kw - layered_res.p_ord_kw;
    let delta_p_pct = if layered_res.p_ord_kw > 0.0 {
        100.0 * delta_p_kw / layered_res.p_ord_kw
    } else {
        0.0
    };

    // clasificación, finanzas y decisión
    let profile = profile_peak_metrics(demand_lpm, tank.dt_s, thr);
    let recommendation =
        build_recommendation(tank, layered, thr, &profile, delta_p_kw, delta_p_pct);
    let financial = financial_impact(delta_p_kw, &cost_n)?;
    let decision = build_final_decision(
        recommendation.level,
        mixed.p_ord_kw,
        layered_res.p_ord_kw,
        delta_p_kw,
        delta_p_pct,
        &financial,
        Some(cost_n.horizon_years),
    );
    let commentary = engineering_commentary(delta_p_kw, delta_p_pct, layered);

    let series = PlotSeries {
        time_s: mixed.time_s.clone(),
        t_tank_mixed_c: mixed.t_primary_c.clone(),
        t_hot_layered_c: layered_res.t_primary_c.clone(),
        t_cold_layered_c: layered_res.t_secondary_c.clone().unwrap_or_default(),
        p_in_mixed_kw: mixed.p_in_kw.clone(),
        p_in_layered_kw: layered_res.p_in_kw.clone(),
    };

    let power_bar = vec![
        BarItem {
            label: "Modelo idealmente mezclado".to_string(),
            value: mixed.p_ord_kw,
            note: "Potencia mínima [kW]".to_string(),
        },
        BarItem {
            label: "Modelo estratificado (2 zonas)".to_string(),
            value: layered_res.p_ord_kw,
            note: "Potencia mínima [kW]".to_string(),
        },
        BarItem {
            label: "Diferencia ΔP".to_string(),
            value: delta_p_kw,
            note: "Mezclado − estratificado [kW]".to_string(),
        },
    ];

    Ok(ComparisonResult {
        p_avg_kw,
        e_acs_kwh,
        mixed,
        layered: layered_res,
        delta_p_kw,
        delta_p_pct,
        recommendation,
        financial,
        decision,
        series,
        power_bar,
        commentary,
    })
}

/// Perfil de referencia de 24 h a paso de 60 s
///
/// Dos picos de 20 min: 60 l/min a las 07:00 y 50 l/min a las 19:00. Es el
/// perfil empleado cuando no se aporta uno propio.
pub fn reference_daily_profile() -> Vec<f64> {
    let mut demand = vec![0.0; 1440];
    for v in demand.iter_mut().take(440).skip(420) {
        *v = 60.0;
    }
    for v in demand.iter_mut().take(1160).skip(1140) {
        *v = 50.0;
    }
    demand
}
