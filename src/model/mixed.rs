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

use crate::error::{AcsDimError, Result};
use crate::model::{energy_capacity_j, regen_time_s, temp_from_energy_j, HeaterControl, TankModel};
use crate::types::{ModelKind, ModelRunResult, TankParams};

/// Depósito idealmente mezclado (una sola masa térmica)
///
/// Convenio de auditoría: la energía extraída en cada paso se valora a la
/// temperatura de consigna con independencia del estado del depósito — la
/// demanda se sirve siempre a la temperatura de entrega objetivo.
#[derive(Debug, Clone)]
pub struct MixedTank<'a> {
    /// Parámetros del depósito
    pub tank: &'a TankParams,
    /// Perfil de demanda [l/min por paso]
    pub demand_lpm: &'a [f64],
    /// Potencia constante de pérdidas [kW]
    pub loss_kw: f64,
    /// Banda de histéresis del control [K] (0 = sin histéresis)
    pub hysteresis_c: f64,
}

impl<'a> TankModel for MixedTank<'a> {
    fn kind(&self) -> ModelKind {
        ModelKind::Mixed
    }

    fn simulate(&self, p_kw: f64) -> Result<ModelRunResult> {
        let tank = self.tank;
        tank.validate()?;
        if p_kw < 0.0 {
            return Err(AcsDimError::WrongInput(format!(
                "la potencia de aporte debe ser >= 0 kW y vale {}",
                p_kw
            )));
        }
        if self.loss_kw < 0.0 {
            return Err(AcsDimError::WrongInput(format!(
                "la potencia de pérdidas debe ser >= 0 kW y vale {}",
                self.loss_kw
            )));
        }

        let dt = f64::from(tank.dt_s);
        let e_cap_j = energy_capacity_j(tank.volume_l, tank.t_set_c, tank.t_cold_c);
        let mut e_j = energy_capacity_j(tank.volume_l, tank.t_init_c, tank.t_cold_c);

        let mut time_s: Vec<u32> = Vec::with_capacity(self.demand_lpm.len());
        let mut temps_c: Vec<f64> = Vec::with_capacity(self.demand_lpm.len());
        let mut p_in_kw: Vec<f64> = Vec::with_capacity(self.demand_lpm.len());

        let mut violation_s = 0_u32;
        let mut t_min_reached_c = temp_from_energy_j(e_j, tank.volume_l, tank.t_cold_c);
        let mut t_min_temp_s = 0_u32;

        let mut control = HeaterControl::new(self.hysteresis_c, t_min_reached_c, tank.t_set_c);

        for (i, lpm) in self.demand_lpm.iter().enumerate() {
            let t_s = (i as u32) * tank.dt_s;
            let t_now = temp_from_energy_j(e_j, tank.volume_l, tank.t_cold_c);

            time_s.push(t_s);
            temps_c.push(t_now);

            // extracción de demanda, valorada a consigna
            let v_delivery_l = lpm.max(0.0) * (dt / 60.0);
            let e_draw_j = energy_capacity_j(v_delivery_l, tank.t_set_c, tank.t_cold_c);
            e_j = (e_j - e_draw_j).max(0.0);

            // pérdidas a potencia constante
            let e_loss_j = self.loss_kw * 1000.0 * dt;
            e_j = (e_j - e_loss_j).max(0.0);

            // control y aporte, con techo en la capacidad a consigna
            let t_after = temp_from_energy_j(e_j, tank.volume_l, tank.t_cold_c);
            let p_in = if control.update(t_after, tank.t_set_c) {
                p_kw
            } else {
                0.0
            };
            p_in_kw.push(p_in);
            e_j = (e_j + p_in * 1000.0 * dt).min(e_cap_j);

            let t_end = temp_from_energy_j(e_j, tank.volume_l, tank.t_cold_c);
            if t_end < tank.t_min_c {
                violation_s += tank.dt_s;
            }
            if t_end < t_min_reached_c {
                t_min_reached_c = t_end;
                t_min_temp_s = t_s + tank.dt_s;
            }
        }

        let regen_to_tmin_s = regen_time_s(&time_s, &temps_c, t_min_temp_s, tank.t_min_c, tank.dt_s);
        let regen_to_tset_s = regen_time_s(&time_s, &temps_c, t_min_temp_s, tank.t_set_c, tank.dt_s);

        Ok(ModelRunResult {
            model: ModelKind::Mixed,
            p_ord_kw: p_kw,
            loss_kw: self.loss_kw,
            time_s,
            t_primary_c: temps_c,
            t_secondary_c: None,
            p_in_kw,
            violation_min: f64::from(violation_s) / 60.0,
            regen_to_tmin_s,
            regen_to_tset_s,
            t_min_temp_s,
            t_min_reached_c,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tank() -> TankParams {
        TankParams {
            volume_l: 200.0,
            t_init_c: 55.0,
            t_set_c: 55.0,
            t_cold_c: 10.0,
            t_min_c: 45.0,
            dt_s: 60,
        }
    }

    #[test]
    fn no_demand_no_loss_keeps_temperature() {
        let tank = tank();
        let demand = vec![0.0; 60];
        let model = MixedTank {
            tank: &tank,
            demand_lpm: &demand,
            loss_kw: 0.0,
            hysteresis_c: 0.0,
        };
        let res = model.simulate(0.0).unwrap();
        assert_eq!(0.0, res.violation_min);
        assert!(res.t_primary_c.iter().all(|t| (*t - 55.0).abs() < 1e-9));
    }

    #[test]
    fn losses_without_power_drain_the_tank() {
        let tank = tank();
        let demand = vec![0.0; 600];
        let model = MixedTank {
            tank: &tank,
            demand_lpm: &demand,
            loss_kw: 3.0,
            hysteresis_c: 0.0,
        };
        let res = model.simulate(0.0).unwrap();
        // 3 kW sobre 200 l terminan incumpliendo el confort
        assert!(res.violation_min > 0.0);
        assert!(res.t_min_reached_c < 45.0);
        // la temperatura es monótona no creciente sin aporte
        for w in res.t_primary_c.windows(2) {
            assert!(w[1] <= w[0] + 1e-9);
        }
    }

    #[test]
    fn ample_power_serves_demand() {
        let tank = tank();
        let mut demand = vec![0.0; 120];
        for v in demand.iter_mut().take(40).skip(20) {
            *v = 10.0;
        }
        let model = MixedTank {
            tank: &tank,
            demand_lpm: &demand,
            loss_kw: 0.5,
            hysteresis_c: 0.0,
        };
        let res = model.simulate(60.0).unwrap();
        assert_eq!(0.0, res.violation_min);
        assert!(res.p_in_kw.iter().any(|p| *p > 0.0));
    }

    #[test]
    fn temperature_never_exceeds_setpoint() {
        let tank = tank();
        let demand = vec![1.0; 120];
        let model = MixedTank {
            tank: &tank,
            demand_lpm: &demand,
            loss_kw: 0.0,
            hysteresis_c: 0.0,
        };
        let res = model.simulate(500.0).unwrap();
        assert!(res.t_primary_c.iter().all(|t| *t <= 55.0 + 1e-9));
    }

    #[test]
    fn rejects_negative_power() {
        let tank = tank();
        let demand = vec![0.0; 10];
        let model = MixedTank {
            tank: &tank,
            demand_lpm: &demand,
            loss_kw: 0.0,
            hysteresis_c: 0.0,
        };
        assert!(model.simulate(-1.0).is_err());
    }
}
