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
Recomendación (recommendation engine)
=====================================

Clasificación doctrinal A / B / C de la diferencia de potencias entre los dos
modelos de depósito, a partir de umbrales explícitos y de heurísticas de forma
del perfil de demanda. Genera el texto del informe citando los criterios
activados, para trazabilidad ante auditoría.

*/

use itertools::Itertools;

use crate::types::{
    LayeredParams, Level, ProfileMetrics, RecMetrics, Recommendation, TankParams, Thresholds,
};

/// Construye la recomendación doctrinal de la comparación de modelos
///
/// Niveles:
///
/// - A: ΔP por debajo de los umbrales absoluto y porcentual
/// - C: ΔP al menos doble de algún umbral, con picos cortos o energía
///   concentrada en picos, y depósito grande o estratificación buena
/// - B: diferencia significativa que no reúne la condición conjunta de C
pub fn build_recommendation(
    tank: &TankParams,
    layered: &LayeredParams,
    thr: &Thresholds,
    profile: &ProfileMetrics,
    delta_p_kw: f64,
    delta_p_pct: f64,
) -> Recommendation {
    let significant_abs = delta_p_kw >= thr.delta_p_abs_kw;
    let significant_pct = delta_p_pct >= thr.delta_p_pct;
    let significant = significant_abs || significant_pct;

    let capacity_hours = if profile.avg_lpm > 0.0 {
        tank.volume_l / (profile.avg_lpm * 60.0)
    } else {
        f64::INFINITY
    };
    let is_large_tank = capacity_hours >= thr.tank_hours;
    let is_short_peaks = profile.peak_max_duration_min > 0.0
        && profile.peak_max_duration_min <= thr.short_peak_max_min;
    let strat_good = layered.mixing_tau_s >= thr.stratification_good_tau_s;

    let strong_delta =
        delta_p_kw >= 2.0 * thr.delta_p_abs_kw || delta_p_pct >= 2.0 * thr.delta_p_pct;

    let level = if !significant {
        Level::A
    } else if strong_delta
        && (is_short_peaks || profile.peak_energy_share >= 0.35)
        && (is_large_tank || strat_good)
    {
        Level::C
    } else {
        Level::B
    };

    let base = format!(
        "En el caso analizado el modelo idealmente mezclado da una potencia contratada superior en \
         un {:.1}% ({:.2} kW) respecto al modelo estratificado de dos zonas.",
        delta_p_pct, delta_p_kw
    );

    let reason = match level {
        Level::A => format!(
            "La diferencia ΔP no supera los umbrales de decisión adoptados ({:.0} kW o {:.0}%). \
             El coste de la simplificación es pequeño y el modelo idealmente mezclado es \
             suficiente como referencia.",
            thr.delta_p_abs_kw, thr.delta_p_pct
        ),
        Level::B => {
            let mut parts = vec![format!(
                "La diferencia ΔP supera al menos uno de los umbrales ({:.0} kW / {:.0}%).",
                thr.delta_p_abs_kw, thr.delta_p_pct
            )];
            if is_short_peaks {
                parts.push(format!(
                    "El perfil contiene picos de corta duración (máx. {:.0} min por encima del \
                     umbral de pico).",
                    profile.peak_max_duration_min
                ));
            }
            if is_large_tank {
                parts.push(format!(
                    "La capacidad del depósito es grande en relación al consumo medio \
                     (≈ {:.2} h de equivalente).",
                    capacity_hours
                ));
            }
            if strat_good {
                parts.push(format!(
                    "La estratificación supuesta es buena (mixing_tau_s = {:.0} s).",
                    layered.mixing_tau_s
                ));
            }
            parts.push(
                "Es razonable adoptar el modelo estratificado para cuantificar el coste de la \
                 simplificación y permitir una decisión informada."
                    .to_string(),
            );
            parts.iter().join(" ")
        }
        Level::C => {
            let mut parts = vec![
                "La diferencia ΔP es significativa e indica un potencial real de reducción de la \
                 potencia contratada sin menoscabo del criterio de confort."
                    .to_string(),
            ];
            if is_short_peaks {
                parts.push("Dominan picos de demanda cortos e intensos.".to_string());
            }
            if profile.peak_energy_share > 0.0 {
                parts.push(format!(
                    "La fracción de energía demandada en picos es de aproximadamente un {:.0}%.",
                    profile.peak_energy_share * 100.0
                ));
            }
            if is_large_tank {
                parts.push(
                    "Un depósito grande favorece cubrir los picos aprovechando la estratificación."
                        .to_string(),
                );
            }
            if strat_good {
                parts.push(
                    "Una buena estratificación amplía adicionalmente la diferencia entre modelos."
                        .to_string(),
                );
            }
            parts.push(
                "En esta situación conviene apoyar la decisión en el resultado del modelo \
                 estratificado y tratar el modelo mezclado como referencia conservadora."
                    .to_string(),
            );
            parts.iter().join(" ")
        }
    };

    let text = format!("{} {}", base, reason);

    let economic_hint = if delta_p_kw > 0.0 {
        Some(format!(
            "Potencial de reducción de la potencia contratada: ~{:.1} kW (≈ {:.1}%).",
            delta_p_kw, delta_p_pct
        ))
    } else {
        None
    };

    Recommendation {
        level,
        title: level.title().to_string(),
        text,
        economic_hint,
        metrics: RecMetrics {
            profile: *profile,
            tank_capacity_hours_at_avg: capacity_hours,
            stratification_tau_s: layered.mixing_tau_s,
            is_short_peaks,
            is_large_tank,
            stratification_good: strat_good,
            thresholds: *thr,
        },
    }
}

/// Comentario de ingeniería para el informe, breve y autocontenido
pub fn engineering_commentary(
    delta_p_kw: f64,
    delta_p_pct: f64,
    layered: &LayeredParams,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(
        "El modelo idealmente mezclado es conservador: reparte el enfriamiento por todo el \
         volumen del depósito y baja antes la temperatura de referencia ante un pico de demanda."
            .to_string(),
    );
    lines.push(
        "El modelo estratificado mantiene la capa caliente en la parte superior: la demanda \
         descarga sobre la zona caliente y la zona fría actúa de amortiguador, de modo que la \
         temperatura de servicio aguanta más tiempo por encima del mínimo."
            .to_string(),
    );

    if delta_p_kw >= 0.0 {
        lines.push(format!(
            "En este caso la simplificación del mezclado ideal sobredimensiona la potencia \
             necesaria en torno a {:.2} kW (≈ {:.1}%).",
            delta_p_kw, delta_p_pct
        ));
    } else {
        // raro pero posible con parámetros de estratificación extremos
        lines.push(format!(
            "En este caso el modelo estratificado resulta más exigente en {:.2} kW \
             (≈ {:.1}%). Revise los parámetros de estratificación (hot_fraction, mixing_tau_s) \
             y el perfil de picos.",
            delta_p_kw.abs(),
            delta_p_pct.abs()
        ));
    }

    lines.push(format!(
        "La mayor diferencia ΔP aparece con picos de demanda cortos e intensos, depósito grande \
         y estratificación buena (aquí: mixing_tau_s = {:.0} s), con una zona caliente que sea \
         una fracción razonable del volumen (aquí: hot_fraction = {:.2}).",
        layered.mixing_tau_s, layered.hot_fraction
    ));
    lines.push(
        "La simplificación del mezclado ideal es aceptable con demanda repartida en el tiempo, \
         depósito pequeño o estratificación débil en la práctica (recirculación, conexiones \
         inadecuadas, caudales altos)."
            .to_string(),
    );

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tank() -> TankParams {
        TankParams {
            volume_l: 800.0,
            t_init_c: 55.0,
            t_set_c: 55.0,
            t_cold_c: 10.0,
            t_min_c: 45.0,
            dt_s: 60,
        }
    }

    fn peaky_profile_metrics() -> ProfileMetrics {
        ProfileMetrics {
            max_lpm: 60.0,
            avg_lpm: 1.5,
            peak_threshold_lpm: 30.0,
            peaks_count: 2,
            peak_max_duration_min: 20.0,
            peak_energy_share: 0.9,
        }
    }

    #[test]
    fn small_gap_is_level_a() {
        let rec = build_recommendation(
            &tank(),
            &LayeredParams::default(),
            &Thresholds::default(),
            &peaky_profile_metrics(),
            2.0,
            4.0,
        );
        assert_eq!(Level::A, rec.level);
        assert!(rec.economic_hint.is_some());
    }

    #[test]
    fn gap_at_abs_threshold_is_level_b_not_a() {
        // ΔP exactamente en el umbral absoluto y por debajo del porcentual
        let rec = build_recommendation(
            &tank(),
            &LayeredParams {
                mixing_tau_s: 60.0,
                ..Default::default()
            },
            &Thresholds::default(),
            &ProfileMetrics {
                peak_max_duration_min: 0.0,
                peak_energy_share: 0.0,
                avg_lpm: 20.0,
                ..peaky_profile_metrics()
            },
            5.0,
            5.0,
        );
        assert_eq!(Level::B, rec.level);
    }

    #[test]
    fn strong_gap_with_short_peaks_and_large_tank_is_level_c() {
        let rec = build_recommendation(
            &tank(),
            &LayeredParams::default(),
            &Thresholds::default(),
            &peaky_profile_metrics(),
            10.0,
            20.0,
        );
        assert_eq!(Level::C, rec.level);
        assert!(rec.metrics.is_short_peaks);
        assert!(rec.metrics.is_large_tank);
        assert!(rec.metrics.stratification_good);
    }

    #[test]
    fn strong_gap_without_peaks_stays_level_b() {
        let flat = ProfileMetrics {
            max_lpm: 10.0,
            avg_lpm: 10.0,
            peak_threshold_lpm: 10.0,
            peaks_count: 0,
            peak_max_duration_min: 0.0,
            peak_energy_share: 0.0,
        };
        let rec = build_recommendation(
            &tank(),
            &LayeredParams::default(),
            &Thresholds::default(),
            &flat,
            10.0,
            20.0,
        );
        assert_eq!(Level::B, rec.level);
    }

    #[test]
    fn negative_gap_has_no_economic_hint() {
        let rec = build_recommendation(
            &tank(),
            &LayeredParams::default(),
            &Thresholds::default(),
            &peaky_profile_metrics(),
            -1.0,
            -2.0,
        );
        assert_eq!(Level::A, rec.level);
        assert!(rec.economic_hint.is_none());
    }

    #[test]
    fn commentary_warns_on_negative_gap() {
        let text = engineering_commentary(-2.0, -4.0, &LayeredParams::default());
        assert!(text.contains("más exigente"));
    }
}
