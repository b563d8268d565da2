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
Impacto financiero y decisión final (financial impact and decision)
===================================================================

Traduce la diferencia de potencias ΔP en costes mensual, anual y del
horizonte de análisis, y compone la propuesta única de potencia contratada
con su justificación para el informe.

*/

use crate::error::Result;
use crate::types::{BarItem, CostParams, Decision, DecisionBasis, FinancialImpact, Level};

/// Calcula el coste de la potencia en exceso ΔP
///
/// - con ΔP ≤ 0 los costes son nulos, con mensaje de ausencia de potencial
/// - sin tarifas los costes son nulos, con mensaje de falta de datos
/// - el coste anual se calcula con su tarifa propia, no como mes × 12, para
///   tolerar redondeos de tarifa
pub fn financial_impact(delta_p_kw: f64, cost: &CostParams) -> Result<FinancialImpact> {
    let cost_n = cost.normalized()?;

    if delta_p_kw <= 0.0 {
        return Ok(FinancialImpact {
            extra_cost_month: 0.0,
            extra_cost_year: 0.0,
            extra_cost_total: 0.0,
            commentary: "En el caso analizado no hay diferencia positiva de potencias (ΔP ≤ 0), \
                         por lo que no existe un coste computable de potencia en exceso derivado \
                         del modelo idealmente mezclado."
                .to_string(),
            cost_bar_year: empty_cost_bar(),
        });
    }

    let (month_rate, year_rate) = match (cost_n.cost_kw_month, cost_n.cost_kw_year) {
        (Some(m), Some(y)) => (m, y),
        _ => {
            return Ok(FinancialImpact {
                extra_cost_month: 0.0,
                extra_cost_year: 0.0,
                extra_cost_total: 0.0,
                commentary: "La diferencia positiva de potencias (ΔP > 0) indica potencial de \
                             reducción de la potencia contratada, pero no se han aportado tarifas \
                             (€/kW·mes o €/kW·año), por lo que no se han cuantificado los efectos \
                             financieros."
                    .to_string(),
                cost_bar_year: empty_cost_bar(),
            })
        }
    };

    let extra_month = delta_p_kw * month_rate;
    let extra_year = delta_p_kw * year_rate;
    let extra_total = extra_year * f64::from(cost_n.horizon_years);

    let commentary = format!(
        "Adoptar el modelo simplificado idealmente mezclado supone sobredimensionar la potencia \
         contratada en {:.2} kW, lo que se traduce en un coste fijo adicional de unos {:.0} € al \
         mes (unos {:.0} € al año). En un horizonte de {} años representa un coste del orden de \
         {:.0} €.",
        delta_p_kw, extra_month, extra_year, cost_n.horizon_years, extra_total
    );

    Ok(FinancialImpact {
        extra_cost_month: extra_month,
        extra_cost_year: extra_year,
        extra_cost_total: extra_total,
        commentary,
        cost_bar_year: vec![BarItem {
            label: "Coste de la potencia en exceso (mezclado vs estratificado)".to_string(),
            value: extra_year,
            note: "Anual".to_string(),
        }],
    })
}

fn empty_cost_bar() -> Vec<BarItem> {
    vec![
        BarItem {
            label: "Modelo idealmente mezclado".to_string(),
            value: 0.0,
            note: "Coste anual de la potencia (fijo)".to_string(),
        },
        BarItem {
            label: "Modelo estratificado (2 zonas)".to_string(),
            value: 0.0,
            note: "Coste anual de la potencia (fijo)".to_string(),
        },
    ]
}

/// Compone la decisión final de potencia contratada
///
/// Reglas:
///
/// - nivel A → potencia del modelo mezclado, fundamento técnico
/// - niveles B/C → potencia del modelo estratificado; el fundamento es
///   técnico-financiero solo si ΔP > 0 y hay coste anual positivo
///
/// No impone un modelo: justifica la elección y muestra el coste de la
/// alternativa.
pub fn build_final_decision(
    level: Level,
    p_mixed_kw: f64,
    p_layered_kw: f64,
    delta_p_kw: f64,
    delta_p_pct: f64,
    financial: &FinancialImpact,
    horizon_years: Option<u32>,
) -> Decision {
    let (p_final_kw, basis, text) = if level == Level::A {
        let lines = vec![
            "Del análisis comparativo de los modelos de ACS se recomienda adoptar la potencia \
             contratada:"
                .to_string(),
            format!("P = {:.1} kW.", p_mixed_kw),
            String::new(),
            "En el caso analizado el modelo idealmente mezclado es suficiente como referencia, \
             ya que la diferencia respecto al modelo estratificado no altera de forma apreciable \
             el resultado del dimensionado."
                .to_string(),
            format!(
                "A título comparativo, el modelo estratificado da P = {:.1} kW \
                 (ΔP = {:.1} kW, ≈ {:.1}%).",
                p_layered_kw, delta_p_kw, delta_p_pct
            ),
        ];
        (p_mixed_kw, DecisionBasis::Technical, lines.join("\n"))
    } else {
        let basis = if delta_p_kw > 0.0 && financial.extra_cost_year > 0.0 {
            DecisionBasis::TechnicalFinancial
        } else {
            DecisionBasis::Technical
        };

        let mut lines = vec![
            "Del análisis comparativo de los modelos de ACS se recomienda adoptar la potencia \
             contratada:"
                .to_string(),
            format!("P = {:.1} kW.", p_layered_kw),
            String::new(),
            format!(
                "El modelo idealmente mezclado se trata como referencia conservadora. En el caso \
                 analizado llevaría a sobredimensionar la potencia en {:.2} kW (≈ {:.1}%) \
                 respecto al modelo estratificado.",
                delta_p_kw, delta_p_pct
            ),
        ];

        if level == Level::C {
            lines.push(
                "La diferencia es relevante e indica una posibilidad real de reducir la potencia \
                 contratada sin menoscabo del criterio de confort de ACS."
                    .to_string(),
            );
        } else {
            lines.push(
                "La diferencia supera los umbrales de decisión adoptados, por lo que se \
                 recomienda asumir el resultado del modelo estratificado."
                    .to_string(),
            );
        }

        if delta_p_kw > 0.0 && financial.extra_cost_year > 0.0 {
            match horizon_years {
                Some(years) => lines.push(format!(
                    "Mantener la potencia del modelo mezclado supondría un coste fijo adicional \
                     de unos {:.0} € al año (del orden de {:.0} € en un horizonte de {} años).",
                    financial.extra_cost_year, financial.extra_cost_total, years
                )),
                None => lines.push(format!(
                    "Mantener la potencia del modelo mezclado supondría un coste fijo adicional \
                     de unos {:.0} € al año.",
                    financial.extra_cost_year
                )),
            }
        } else {
            lines.push(
                "Los efectos financieros de la decisión pueden cuantificarse aportando las \
                 tarifas de potencia (€/kW·mes o €/kW·año)."
                    .to_string(),
            );
        }

        lines.push(
            "El valor adoptado preserva el confort de ACS y deja una justificación técnica \
             trazable de la decisión."
                .to_string(),
        );

        (p_layered_kw, basis, lines.join("\n"))
    };

    Decision {
        level,
        color: level.color().to_string(),
        title: "POTENCIA CONTRATADA RECOMENDADA".to_string(),
        p_ord_mixed_kw: p_mixed_kw,
        p_ord_layered_kw: p_layered_kw,
        p_ord_final_kw: p_final_kw,
        basis,
        text,
        rows: vec![
            BarItem {
                label: "P (modelo idealmente mezclado)".to_string(),
                value: p_mixed_kw,
                note: String::new(),
            },
            BarItem {
                label: "P (modelo estratificado)".to_string(),
                value: p_layered_kw,
                note: String::new(),
            },
            BarItem {
                label: "P (recomendada)".to_string(),
                value: p_final_kw,
                note: String::new(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_gap_zeroes_costs() {
        let cost = CostParams {
            cost_kw_month: Some(50.0),
            cost_kw_year: None,
            horizon_years: 10,
        };
        for &delta in &[0.0, -3.0] {
            let fin = financial_impact(delta, &cost).unwrap();
            assert_eq!(0.0, fin.extra_cost_month);
            assert_eq!(0.0, fin.extra_cost_year);
            assert_eq!(0.0, fin.extra_cost_total);
            assert!(!fin.commentary.is_empty());
        }
    }

    #[test]
    fn positive_gap_without_tariff_zeroes_costs_with_message() {
        let fin = financial_impact(5.0, &CostParams::default()).unwrap();
        assert_eq!(0.0, fin.extra_cost_year);
        assert!(fin.commentary.contains("tarifas"));
    }

    #[test]
    fn costs_scale_with_gap_and_rates() {
        let cost = CostParams {
            cost_kw_month: Some(50.0),
            cost_kw_year: None,
            horizon_years: 10,
        };
        let fin = financial_impact(4.0, &cost).unwrap();
        assert_eq!("200", format!("{:.0}", fin.extra_cost_month));
        assert_eq!("2400", format!("{:.0}", fin.extra_cost_year));
        assert_eq!("24000", format!("{:.0}", fin.extra_cost_total));
        assert_eq!(1, fin.cost_bar_year.len());
    }

    #[test]
    fn level_a_chooses_mixed_power() {
        let fin = financial_impact(1.0, &CostParams::default()).unwrap();
        let dec = build_final_decision(Level::A, 40.0, 39.0, 1.0, 2.6, &fin, None);
        assert_eq!(40.0, dec.p_ord_final_kw);
        assert_eq!(DecisionBasis::Technical, dec.basis);
        assert_eq!("green", dec.color);
    }

    #[test]
    fn level_b_with_costs_is_technical_financial() {
        let cost = CostParams {
            cost_kw_month: Some(50.0),
            cost_kw_year: None,
            horizon_years: 10,
        };
        let fin = financial_impact(8.0, &cost).unwrap();
        let dec = build_final_decision(Level::B, 48.0, 40.0, 8.0, 20.0, &fin, Some(10));
        assert_eq!(40.0, dec.p_ord_final_kw);
        assert_eq!(DecisionBasis::TechnicalFinancial, dec.basis);
        assert!(dec.text.contains("horizonte de 10 años"));
    }

    #[test]
    fn level_c_negative_gap_still_chooses_layered_power() {
        // comportamiento especificado: B/C fuerzan el resultado estratificado
        // aunque ΔP sea negativo (aviso de coherencia de parámetros, no error)
        let fin = financial_impact(-2.0, &CostParams::default()).unwrap();
        let dec = build_final_decision(Level::C, 38.0, 40.0, -2.0, -5.0, &fin, None);
        assert_eq!(40.0, dec.p_ord_final_kw);
        assert_eq!(DecisionBasis::Technical, dec.basis);
        assert_eq!("red", dec.color);
    }
}
