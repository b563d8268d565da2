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

use serde::{Deserialize, Serialize};

use crate::error::{AcsDimError, Result};
use crate::types::common::LossSplit;

// ==================== Parámetros de entrada (input parameters)

// -------------------- TankParams

/// Parámetros comunes del depósito de ACS
///
/// Convención audit: el caudal de demanda se define como agua entregada en los puntos
/// de consumo a la temperatura de consigna `t_set_c` (tras mezcla), y la energía
/// almacenada se mide respecto a la temperatura de entrada de agua fría:
///
/// `E = rho · cp · V · (T - t_cold_c)`
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankParams {
    /// Volumen del depósito [l]
    pub volume_l: f64,
    /// Temperatura inicial del agua almacenada [°C]
    pub t_init_c: f64,
    /// Temperatura de consigna (de entrega) [°C]
    pub t_set_c: f64,
    /// Temperatura del agua fría de entrada [°C]
    pub t_cold_c: f64,
    /// Temperatura mínima admisible (criterio de confort) [°C]
    pub t_min_c: f64,
    /// Duración del paso de cálculo [s]
    pub dt_s: u32,
}

impl TankParams {
    /// Comprueba la validez de los parámetros del depósito
    pub fn validate(&self) -> Result<()> {
        if self.volume_l <= 0.0 {
            return Err(AcsDimError::WrongInput(format!(
                "el volumen del depósito debe ser > 0 l y vale {}",
                self.volume_l
            )));
        }
        if self.dt_s == 0 {
            return Err(AcsDimError::WrongInput(
                "el paso de cálculo dt_s debe ser > 0 s".into(),
            ));
        }
        if self.t_set_c <= self.t_cold_c {
            return Err(AcsDimError::WrongInput(format!(
                "la temperatura de consigna ({}) debe ser mayor que la de agua fría ({})",
                self.t_set_c, self.t_cold_c
            )));
        }
        Ok(())
    }
}

// -------------------- LayeredParams

/// Parámetros del depósito estratificado de dos zonas
///
/// `mixing_tau_s` es la constante de tiempo de la mezcla lenta entre zonas
/// (relajación hacia la temperatura de equilibrio). Un valor alto implica
/// buena estratificación (equilibrado lento).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredParams {
    /// Fracción del volumen total ocupada por la zona caliente [0.05, 0.95]
    pub hot_fraction: f64,
    /// Constante de tiempo de mezcla entre zonas [s]
    pub mixing_tau_s: f64,
    /// Reparto de pérdidas entre zonas
    pub losses_split: LossSplit,
}

impl LayeredParams {
    /// Comprueba la validez de los parámetros de estratificación
    ///
    /// Fuera de la banda [0.05, 0.95] el reparto físico de zonas degenera.
    pub fn validate(&self) -> Result<()> {
        if !(0.05..=0.95).contains(&self.hot_fraction) {
            return Err(AcsDimError::WrongInput(format!(
                "hot_fraction debe estar en [0.05, 0.95] y vale {}",
                self.hot_fraction
            )));
        }
        if self.mixing_tau_s < 0.0 {
            return Err(AcsDimError::WrongInput(format!(
                "mixing_tau_s debe ser >= 0 s y vale {}",
                self.mixing_tau_s
            )));
        }
        Ok(())
    }
}

impl Default for LayeredParams {
    fn default() -> LayeredParams {
        LayeredParams {
            hot_fraction: 0.3,
            mixing_tau_s: 3600.0,
            losses_split: LossSplit::ByVolume,
        }
    }
}

// -------------------- LossInput

/// Especificación de las pérdidas térmicas del depósito
///
/// Las pérdidas se aplican en la simulación como una potencia constante,
/// independiente del consumo instantáneo. Se admite exactamente una familia:
///
/// - `loss_kw`: potencia de pérdidas directa [kW]
/// - `loss_pct_of_pavg`: porcentaje de la potencia media de ACS del periodo
/// - `ua_w_per_k` + `delta_t_k`: pérdidas UA·ΔT con salto térmico fijo
///
/// El porcentaje sobre la potencia de pico no se admite por criterio de
/// auditoría y deliberadamente no está soportado.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LossInput {
    /// Potencia constante de pérdidas [kW]
    pub loss_kw: Option<f64>,
    /// Porcentaje de la potencia media de ACS [%]
    pub loss_pct_of_pavg: Option<f64>,
    /// Coeficiente global de pérdidas [W/K]
    pub ua_w_per_k: Option<f64>,
    /// Salto térmico fijo asociado a UA [K]
    pub delta_t_k: Option<f64>,
}

impl LossInput {
    /// Comprueba que se ha definido exactamente una familia de pérdidas válida
    pub fn validate(&self) -> Result<()> {
        let families = [
            self.loss_kw.is_some(),
            self.loss_pct_of_pavg.is_some(),
            self.ua_w_per_k.is_some() || self.delta_t_k.is_some(),
        ];
        match families.iter().filter(|v| **v).count() {
            0 => {
                return Err(AcsDimError::WrongInput(
                    "indique loss_kw, loss_pct_of_pavg o ua_w_per_k + delta_t_k".into(),
                ))
            }
            1 => (),
            _ => {
                return Err(AcsDimError::WrongInput(
                    "las familias de pérdidas son excluyentes: indique solo una".into(),
                ))
            }
        }
        if self.ua_w_per_k.is_some() && self.delta_t_k.is_none() {
            return Err(AcsDimError::WrongInput(
                "con ua_w_per_k debe indicarse delta_t_k (salto térmico fijo)".into(),
            ));
        }
        if self.delta_t_k.is_some() && self.ua_w_per_k.is_none() {
            return Err(AcsDimError::WrongInput(
                "con delta_t_k debe indicarse ua_w_per_k".into(),
            ));
        }
        for (name, value) in &[
            ("loss_kw", self.loss_kw),
            ("loss_pct_of_pavg", self.loss_pct_of_pavg),
            ("ua_w_per_k", self.ua_w_per_k),
            ("delta_t_k", self.delta_t_k),
        ] {
            if let Some(v) = value {
                if *v < 0.0 {
                    return Err(AcsDimError::WrongInput(format!(
                        "{} debe ser >= 0 y vale {}",
                        name, v
                    )));
                }
            }
        }
        Ok(())
    }
}

// -------------------- CostParams

/// Parámetros de la evaluación financiera de la potencia contratada
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostParams {
    /// Coste mensual por kW contratado [€/kW·mes]
    pub cost_kw_month: Option<f64>,
    /// Coste anual por kW contratado [€/kW·año]
    pub cost_kw_year: Option<f64>,
    /// Horizonte de análisis [años]
    pub horizon_years: u32,
}

impl CostParams {
    /// Deriva la forma normalizada, con coste mensual y anual coherentes
    ///
    /// Devuelve un valor nuevo: si solo se aporta una tarifa la otra se deriva
    /// (año = mes × 12, mes = año / 12). Sin tarifas, ambas quedan sin definir
    /// y los costes posteriores serán nulos.
    pub fn normalized(&self) -> Result<CostParams> {
        if let Some(month) = self.cost_kw_month {
            if month < 0.0 {
                return Err(AcsDimError::WrongInput(format!(
                    "cost_kw_month debe ser >= 0 y vale {}",
                    month
                )));
            }
        }
        if let Some(year) = self.cost_kw_year {
            if year < 0.0 {
                return Err(AcsDimError::WrongInput(format!(
                    "cost_kw_year debe ser >= 0 y vale {}",
                    year
                )));
            }
        }
        if self.horizon_years == 0 {
            return Err(AcsDimError::WrongInput(
                "el horizonte de análisis debe ser > 0 años".into(),
            ));
        }

        let (month, year) = match (self.cost_kw_month, self.cost_kw_year) {
            (Some(m), None) => (Some(m), Some(m * 12.0)),
            (None, Some(y)) => (Some(y / 12.0), Some(y)),
            other => other,
        };

        Ok(CostParams {
            cost_kw_month: month,
            cost_kw_year: year,
            horizon_years: self.horizon_years,
        })
    }

    /// Indica si hay tarifa definida (tras normalizar)
    pub fn has_tariff(&self) -> bool {
        self.cost_kw_month.is_some() || self.cost_kw_year.is_some()
    }
}

impl Default for CostParams {
    fn default() -> CostParams {
        CostParams {
            cost_kw_month: None,
            cost_kw_year: None,
            horizon_years: 10,
        }
    }
}

// -------------------- SearchParams

/// Ajustes de la búsqueda de potencia mínima por bisección
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Potencia inicial de la expansión geométrica [kW]
    pub p_start_kw: f64,
    /// Límite superior absoluto de potencia [kW]
    pub p_max_kw: f64,
    /// Tolerancia de potencia del resultado [kW]
    pub tol_kw: f64,
}

impl SearchParams {
    /// Comprueba la validez de los ajustes de búsqueda
    pub fn validate(&self) -> Result<()> {
        if self.tol_kw <= 0.0 {
            return Err(AcsDimError::WrongInput(format!(
                "tol_kw debe ser > 0 kW y vale {}",
                self.tol_kw
            )));
        }
        if self.p_start_kw <= 0.0 {
            return Err(AcsDimError::WrongInput(format!(
                "p_start_kw debe ser > 0 kW y vale {}",
                self.p_start_kw
            )));
        }
        if self.p_max_kw < self.p_start_kw {
            return Err(AcsDimError::WrongInput(format!(
                "p_max_kw ({}) debe ser >= p_start_kw ({})",
                self.p_max_kw, self.p_start_kw
            )));
        }
        Ok(())
    }
}

impl Default for SearchParams {
    fn default() -> SearchParams {
        SearchParams {
            p_start_kw: 10.0,
            p_max_kw: 5000.0,
            tol_kw: 0.1,
        }
    }
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

    #[test]
    fn tank_validation() {
        assert!(tank().validate().is_ok());
        assert!(TankParams {
            volume_l: 0.0,
            ..tank()
        }
        .validate()
        .is_err());
        assert!(TankParams {
            t_set_c: 10.0,
            ..tank()
        }
        .validate()
        .is_err());
        assert!(TankParams { dt_s: 0, ..tank() }.validate().is_err());
    }

    #[test]
    fn layered_fraction_band() {
        assert!(LayeredParams::default().validate().is_ok());
        let bad = LayeredParams {
            hot_fraction: 0.99,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn loss_input_exactly_one_family() {
        // ninguna familia
        assert!(LossInput::default().validate().is_err());
        // una familia
        assert!(LossInput {
            loss_kw: Some(3.0),
            ..Default::default()
        }
        .validate()
        .is_ok());
        // UA sin salto térmico
        assert!(LossInput {
            ua_w_per_k: Some(12.0),
            ..Default::default()
        }
        .validate()
        .is_err());
        // salto térmico sin UA
        assert!(LossInput {
            delta_t_k: Some(35.0),
            ..Default::default()
        }
        .validate()
        .is_err());
        // familias en conflicto
        assert!(LossInput {
            loss_kw: Some(3.0),
            loss_pct_of_pavg: Some(20.0),
            ..Default::default()
        }
        .validate()
        .is_err());
        // negativos
        assert!(LossInput {
            loss_kw: Some(-1.0),
            ..Default::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn cost_params_normalization() {
        let from_month = CostParams {
            cost_kw_month: Some(50.0),
            cost_kw_year: None,
            horizon_years: 10,
        }
        .normalized()
        .unwrap();
        assert_eq!(Some(600.0), from_month.cost_kw_year);

        let from_year = CostParams {
            cost_kw_month: None,
            cost_kw_year: Some(600.0),
            horizon_years: 10,
        }
        .normalized()
        .unwrap();
        assert_eq!(Some(50.0), from_year.cost_kw_month);

        assert!(!CostParams::default().normalized().unwrap().has_tariff());
        assert!(CostParams {
            horizon_years: 0,
            ..Default::default()
        }
        .normalized()
        .is_err());
    }

    #[test]
    fn search_params_validation() {
        assert!(SearchParams::default().validate().is_ok());
        assert!(SearchParams {
            tol_kw: 0.0,
            ..Default::default()
        }
        .validate()
        .is_err());
        assert!(SearchParams {
            p_start_kw: 0.0,
            ..Default::default()
        }
        .validate()
        .is_err());
    }
}
