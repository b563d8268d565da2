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
Búsqueda de potencia mínima (minimal power search)
==================================================

Encuentra la menor potencia de aporte constante cuya duración simulada de
incumplimiento de confort queda dentro del presupuesto admitido: expansión
geométrica desde la potencia inicial hasta acotar una potencia factible y
bisección posterior hasta la tolerancia configurada.

La corrección se apoya en que la factibilidad es monótona no decreciente con
la potencia (más aporte solo puede reducir o mantener el incumplimiento), lo
que ambos simuladores cumplen por construcción.

*/

use crate::error::{AcsDimError, Result};
use crate::model::TankModel;
use crate::types::{ModelRunResult, SearchParams};

/// Busca la potencia mínima que cumple el presupuesto de incumplimiento
///
/// Devuelve el resultado de simulación del último punto factible evaluado.
/// La tolerancia es un cuanto de potencia: el valor devuelto puede exceder el
/// óptimo en hasta `tol_kw`, siempre del lado factible.
///
/// # Errors
///
/// * Ajustes de búsqueda incorrectos (tolerancia o arranque no positivos)
/// * `SearchExhausted` si no hay potencia factible hasta `p_max_kw`
pub fn find_min_power(
    model: &dyn TankModel,
    allowed_violation_min: f64,
    search: &SearchParams,
) -> Result<ModelRunResult> {
    search.validate()?;

    let feasible = |p_kw: f64| -> Result<(bool, ModelRunResult)> {
        let res = model.simulate(p_kw)?;
        Ok((res.violation_min <= allowed_violation_min, res))
    };

    // expansión geométrica hasta acotar una potencia factible
    let mut p_hi = search.p_start_kw;
    let (mut hi_ok, mut res_hi) = feasible(p_hi)?;
    while !hi_ok && p_hi < search.p_max_kw {
        p_hi *= 2.0;
        let (ok, res) = feasible(p_hi)?;
        hi_ok = ok;
        res_hi = res;
    }

    if !hi_ok {
        return Err(AcsDimError::SearchExhausted(format!(
            "no hay potencia factible para el modelo {} hasta {} kW",
            model.kind(),
            search.p_max_kw
        )));
    }

    // bisección entre el último punto infactible y el primero factible
    let mut p_lo = 0.0;
    while p_hi - p_lo > search.tol_kw {
        let p_mid = 0.5 * (p_lo + p_hi);
        let (mid_ok, res_mid) = feasible(p_mid)?;
        if mid_ok {
            p_hi = p_mid;
            res_hi = res_mid;
        } else {
            p_lo = p_mid;
        }
    }

    Ok(res_hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::types::{ModelKind, ModelRunResult};

    /// Modelo sintético: el incumplimiento cae linealmente hasta cero en `p_ok`
    struct FakeModel {
        p_ok: f64,
    }

    impl TankModel for FakeModel {
        fn kind(&self) -> ModelKind {
            ModelKind::Mixed
        }

        fn simulate(&self, p_kw: f64) -> Result<ModelRunResult> {
            let violation_min = (self.p_ok - p_kw).max(0.0);
            Ok(ModelRunResult {
                model: ModelKind::Mixed,
                p_ord_kw: p_kw,
                loss_kw: 0.0,
                time_s: vec![0],
                t_primary_c: vec![55.0],
                t_secondary_c: None,
                p_in_kw: vec![p_kw],
                violation_min,
                regen_to_tmin_s: None,
                regen_to_tset_s: None,
                t_min_temp_s: 0,
                t_min_reached_c: 55.0,
            })
        }
    }

    #[test]
    fn converges_within_tolerance() {
        let model = FakeModel { p_ok: 37.3 };
        let search = SearchParams {
            p_start_kw: 10.0,
            p_max_kw: 5000.0,
            tol_kw: 0.1,
        };
        let res = find_min_power(&model, 0.0, &search).unwrap();
        assert!(res.violation_min <= 0.0);
        assert!(res.p_ord_kw >= 37.3);
        assert!(res.p_ord_kw <= 37.3 + 0.1);
    }

    #[test]
    fn feasible_start_returns_immediately_bisected() {
        let model = FakeModel { p_ok: 2.0 };
        let search = SearchParams::default();
        let res = find_min_power(&model, 0.0, &search).unwrap();
        assert!(res.p_ord_kw >= 2.0);
        assert!(res.p_ord_kw <= 2.0 + search.tol_kw);
    }

    #[test]
    fn ceiling_exceeded_is_fatal() {
        let model = FakeModel { p_ok: 1.0e6 };
        let search = SearchParams::default();
        match find_min_power(&model, 0.0, &search) {
            Err(AcsDimError::SearchExhausted(_)) => (),
            other => panic!("se esperaba SearchExhausted y se obtuvo {:?}", other),
        }
    }

    #[test]
    fn violation_budget_is_honored() {
        let model = FakeModel { p_ok: 50.0 };
        let search = SearchParams::default();
        // con presupuesto de 5 min basta una potencia 5 kW menor
        let res = find_min_power(&model, 5.0, &search).unwrap();
        assert!(res.violation_min <= 5.0);
        assert!(res.p_ord_kw >= 45.0);
        assert!(res.p_ord_kw <= 45.0 + search.tol_kw);
    }
}
