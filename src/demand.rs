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
Demanda de ACS (DHW demand)
===========================

Contabilidad previa de la demanda: energía total y potencia media del
periodo, y métricas de forma del perfil (picos) usadas por la clasificación.

El perfil de demanda es una secuencia densa de caudales instantáneos [l/min],
uno por paso de cálculo, definidos en los puntos de consumo a la temperatura
de entrega (≈ consigna).

*/

use itertools::Itertools;

use crate::error::{AcsDimError, Result};
use crate::model::{CP_J_PER_KG_K, RHO_KG_PER_L};
use crate::types::{ProfileMetrics, Thresholds};

/// Calcula la energía total [kWh] y la potencia media [kW] de la demanda
///
/// Paso previo obligatorio: la resolución de pérdidas en modo porcentual y
/// varias heurísticas de la recomendación dependen de la potencia media.
///
/// # Errors
///
/// * Perfil de demanda vacío
/// * Paso de cálculo nulo
/// * Temperatura de entrega no superior a la de agua fría
pub fn demand_energy_and_pavg(
    demand_lpm: &[f64],
    dt_s: u32,
    t_cold_c: f64,
    t_delivery_c: f64,
) -> Result<(f64, f64)> {
    if dt_s == 0 {
        return Err(AcsDimError::WrongInput(
            "el paso de cálculo dt_s debe ser > 0 s".into(),
        ));
    }
    if demand_lpm.is_empty() {
        return Err(AcsDimError::WrongInput(
            "el perfil de demanda no puede estar vacío".into(),
        ));
    }
    if t_delivery_c <= t_cold_c {
        return Err(AcsDimError::WrongInput(format!(
            "la temperatura de entrega ({}) debe ser mayor que la de agua fría ({})",
            t_delivery_c, t_cold_c
        )));
    }

    let dt = f64::from(dt_s);
    let d_t = t_delivery_c - t_cold_c;

    let total_j: f64 = demand_lpm
        .iter()
        .map(|lpm| {
            let v_delivery_l = lpm.max(0.0) * (dt / 60.0);
            v_delivery_l * RHO_KG_PER_L * CP_J_PER_KG_K * d_t
        })
        .sum();

    let total_kwh = total_j / 3_600_000.0;
    let total_h = (demand_lpm.len() as f64) * dt / 3600.0;
    let p_avg_kw = total_kwh / total_h;

    Ok((total_kwh, p_avg_kw))
}

/// Calcula las métricas de forma del perfil de demanda
///
/// Un pico es un tramo contiguo de pasos con caudal no inferior a
/// `max(peak_min_lpm, peak_fraction_of_max · caudal máximo)`. Con consigna y
/// agua fría constantes, la fracción de energía en picos es proporcional a la
/// suma de caudales dentro de picos.
pub fn profile_peak_metrics(demand_lpm: &[f64], dt_s: u32, thr: &Thresholds) -> ProfileMetrics {
    let values: Vec<f64> = demand_lpm.iter().map(|x| x.max(0.0)).collect();

    let max_lpm = values.iter().cloned().fold(0.0, f64::max);
    let avg_lpm = if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / (values.len() as f64)
    };

    let peak_thr = thr.peak_min_lpm.max(thr.peak_fraction_of_max * max_lpm);

    let segments: Vec<usize> = values
        .iter()
        .map(|v| *v >= peak_thr)
        .group_by(|is_peak| *is_peak)
        .into_iter()
        .filter(|(is_peak, _)| *is_peak)
        .map(|(_, group)| group.count())
        .collect();

    let max_peak_steps = segments.iter().cloned().max().unwrap_or(0);
    let peak_max_duration_min = (max_peak_steps as f64) * f64::from(dt_s) / 60.0;

    let total_sum: f64 = values.iter().sum();
    let peak_sum: f64 = values.iter().filter(|v| **v >= peak_thr).sum();
    let peak_energy_share = if total_sum > 0.0 {
        peak_sum / total_sum
    } else {
        0.0
    };

    ProfileMetrics {
        max_lpm,
        avg_lpm,
        peak_threshold_lpm: peak_thr,
        peaks_count: segments.len(),
        peak_max_duration_min,
        peak_energy_share,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepass_constant_draw() {
        // 10 l/min durante 1 h a ΔT = 45 K
        let demand = vec![10.0; 60];
        let (e_kwh, p_avg_kw) = demand_energy_and_pavg(&demand, 60, 10.0, 55.0).unwrap();
        // E = 600 l · 4180 J/kgK · 45 K = 112.86 MJ = 31.35 kWh
        assert_eq!("31.350", format!("{:.3}", e_kwh));
        assert_eq!("31.350", format!("{:.3}", p_avg_kw));
    }

    #[test]
    fn prepass_rejects_bad_inputs() {
        assert!(demand_energy_and_pavg(&[], 60, 10.0, 55.0).is_err());
        assert!(demand_energy_and_pavg(&[1.0], 0, 10.0, 55.0).is_err());
        assert!(demand_energy_and_pavg(&[1.0], 60, 55.0, 55.0).is_err());
    }

    #[test]
    fn prepass_clamps_negative_flows() {
        let (e_kwh, _) = demand_energy_and_pavg(&[-5.0, 0.0], 60, 10.0, 55.0).unwrap();
        assert_eq!(0.0, e_kwh);
    }

    #[test]
    fn peak_metrics_two_segments() {
        let mut demand = vec![0.0; 100];
        for v in demand.iter_mut().take(30).skip(10) {
            *v = 60.0;
        }
        for v in demand.iter_mut().take(85).skip(70) {
            *v = 50.0;
        }
        let m = profile_peak_metrics(&demand, 60, &Thresholds::default());
        assert_eq!(2, m.peaks_count);
        assert_eq!(60.0, m.max_lpm);
        // umbral = max(10, 0.5 · 60) = 30 l/min
        assert_eq!(30.0, m.peak_threshold_lpm);
        assert_eq!(20.0, m.peak_max_duration_min);
        // todo el volumen se demanda dentro de picos
        assert_eq!(1.0, m.peak_energy_share);
    }

    #[test]
    fn peak_metrics_flat_profile() {
        let m = profile_peak_metrics(&[0.0; 10], 60, &Thresholds::default());
        assert_eq!(0, m.peaks_count);
        assert_eq!(0.0, m.peak_max_duration_min);
        assert_eq!(0.0, m.peak_energy_share);
    }
}
