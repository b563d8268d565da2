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
Resolución de pérdidas térmicas (thermal loss resolution)
=========================================================

Convierte la especificación de pérdidas del depósito en una potencia
constante en kW, común a los dos modelos de simulación. Las tres familias
admitidas son excluyentes y la referencia porcentual es siempre la potencia
media del periodo, nunca la de pico.

*/

use crate::error::{AcsDimError, Result};
use crate::types::LossInput;

/// Resuelve la especificación de pérdidas a una potencia constante [kW]
///
/// `p_avg_kw` es la potencia media de ACS del periodo, calculada en la
/// prelectura de la demanda. Solo interviene en la familia porcentual y se
/// trunca a cero si fuese negativa.
pub fn resolve_loss_kw(loss: &LossInput, p_avg_kw: f64) -> Result<f64> {
    loss.validate()?;

    if let Some(loss_kw) = loss.loss_kw {
        return Ok(loss_kw);
    }
    if let (Some(ua), Some(delta_t)) = (loss.ua_w_per_k, loss.delta_t_k) {
        return Ok(ua * delta_t / 1000.0);
    }
    if let Some(pct) = loss.loss_pct_of_pavg {
        return Ok(pct / 100.0 * p_avg_kw.max(0.0));
    }

    // validate() garantiza exactamente una familia definida
    Err(AcsDimError::Internal(
        "especificación de pérdidas no resuelta tras la validación".into(),
    ))
}
