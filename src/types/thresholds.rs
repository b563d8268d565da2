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

/// Umbrales de la clasificación de la recomendación
///
/// Umbrales explícitos y editables: la herramienta es doctrinal, no normativa,
/// de modo que los umbrales son parámetros de la evaluación y no constantes
/// derivadas. Todos los niveles informan siempre de los dos modelos.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Umbral absoluto de la diferencia de potencias ΔP [kW]
    pub delta_p_abs_kw: f64,
    /// Umbral porcentual de la diferencia de potencias ΔP [%]
    pub delta_p_pct: f64,
    /// Fracción del caudal máximo que define un pico de demanda [-]
    pub peak_fraction_of_max: f64,
    /// Caudal mínimo para considerar pico [l/min]
    pub peak_min_lpm: f64,
    /// Duración máxima de un pico considerado corto [min]
    pub short_peak_max_min: f64,
    /// Capacidad del depósito en horas de consumo medio a partir de la que se considera grande [h]
    pub tank_hours: f64,
    /// Constante de tiempo de mezcla a partir de la que la estratificación se considera buena [s]
    pub stratification_good_tau_s: f64,
}

impl Default for Thresholds {
    fn default() -> Thresholds {
        Thresholds {
            delta_p_abs_kw: 5.0,
            delta_p_pct: 10.0,
            peak_fraction_of_max: 0.5,
            peak_min_lpm: 10.0,
            short_peak_max_min: 30.0,
            tank_hours: 1.0,
            stratification_good_tau_s: 1800.0,
        }
    }
}
