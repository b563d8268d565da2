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
Modelos de depósito (tank models)
=================================

Simuladores del balance de energía del depósito de ACS en pasos de tiempo
fijos, bajo dos topologías: idealmente mezclado (una masa térmica) y
estratificado de dos zonas. Ambos comparten el convenio de energía respecto
al agua fría y el control ON/OFF (con histéresis opcional) del aporte.

La búsqueda de potencia mínima opera sobre el trait [`TankModel`] sin conocer
el modelo concreto.

*/

mod layered;
mod mixed;

pub use layered::LayeredTank;
pub use mixed::MixedTank;

use crate::error::Result;
use crate::types::{ModelKind, ModelRunResult};

/// Densidad del agua [kg/l]
pub const RHO_KG_PER_L: f64 = 1.0;
/// Calor específico del agua [J/(kg·K)]
pub const CP_J_PER_KG_K: f64 = 4180.0;

/// Simulador de depósito parametrizado por la potencia de aporte
///
/// Un simulador queda configurado con el depósito, el perfil de demanda y las
/// pérdidas; cada evaluación es una función pura de la potencia candidata.
pub trait TankModel {
    /// Modelo físico del simulador
    fn kind(&self) -> ModelKind;

    /// Simula el periodo completo con potencia de aporte fija `p_kw` [kW]
    fn simulate(&self, p_kw: f64) -> Result<ModelRunResult>;
}

// ==================== Utilidades comunes de energía

/// Energía almacenada en `volume_l` litros a `t_target_c` respecto a `t_cold_c` [J]
pub(crate) fn energy_capacity_j(volume_l: f64, t_target_c: f64, t_cold_c: f64) -> f64 {
    volume_l * RHO_KG_PER_L * CP_J_PER_KG_K * (t_target_c - t_cold_c).max(0.0)
}

/// Temperatura correspondiente a una energía almacenada [°C]
pub(crate) fn temp_from_energy_j(e_j: f64, volume_l: f64, t_cold_c: f64) -> f64 {
    let m_kg = volume_l * RHO_KG_PER_L;
    if m_kg <= 0.0 {
        return t_cold_c;
    }
    t_cold_c + e_j.max(0.0) / (m_kg * CP_J_PER_KG_K)
}

/// Tiempo de regeneración desde el instante de temperatura mínima hasta
/// superar `threshold_c`, buscando hacia delante en la serie [s]
pub(crate) fn regen_time_s(
    time_s: &[u32],
    temp_c: &[f64],
    t_min_temp_s: u32,
    threshold_c: f64,
    dt_s: u32,
) -> Option<u32> {
    if time_s.is_empty() {
        return None;
    }
    let start_idx = ((t_min_temp_s / dt_s) as usize).min(time_s.len() - 1);
    for (t, temp) in time_s.iter().zip(temp_c.iter()).skip(start_idx) {
        if *temp >= threshold_c {
            return Some(t.saturating_sub(t_min_temp_s));
        }
    }
    None
}

/// Control ON/OFF del aporte con banda de histéresis opcional
///
/// Con histéresis nula el aporte está activo siempre que la temperatura de
/// control quede por debajo de la consigna. Con histéresis positiva el estado
/// ON persiste hasta alcanzar la consigna y el OFF hasta caer por debajo de
/// `t_set - hysteresis`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HeaterControl {
    hysteresis_c: f64,
    on: bool,
}

impl HeaterControl {
    pub(crate) fn new(hysteresis_c: f64, t_start_c: f64, t_set_c: f64) -> Self {
        HeaterControl {
            hysteresis_c,
            on: t_start_c < t_set_c,
        }
    }

    /// Actualiza el estado con la temperatura de control y devuelve si el aporte está activo
    pub(crate) fn update(&mut self, t_c: f64, t_set_c: f64) -> bool {
        if self.hysteresis_c > 0.0 {
            if self.on && t_c >= t_set_c {
                self.on = false;
            } else if !self.on && t_c <= t_set_c - self.hysteresis_c {
                self.on = true;
            }
        } else {
            self.on = t_c < t_set_c;
        }
        self.on
    }
}
