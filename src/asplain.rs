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

use crate::types::*;

// ==================== Conversión a formato simple

/// Muestra en formato simple
///
/// Esta función usa un formato simple y compacto para representar el resultado
/// de la comparación de modelos de ACS: potencias, confort, recomendación,
/// impacto financiero y decisión final
pub trait AsPlain {
    /// Get in plain format
    fn to_plain(&self) -> String;
}

// ================= Implementaciones ====================

/// Muestra un tiempo opcional en minutos o como un guion si no se alcanza
fn regen_or_dash(v: Option<u32>) -> String {
    match v {
        Some(secs) => format!("{:.1} min", f64::from(secs) / 60.0),
        None => "-".to_string(),
    }
}

fn model_block(res: &ModelRunResult) -> String {
    let p_ord = res.p_ord_kw;
    let loss = res.loss_kw;
    let violation = res.violation_min;
    let t_min = res.t_min_reached_c;
    let t_min_at = f64::from(res.t_min_temp_s) / 3600.0;
    let regen_tmin = regen_or_dash(res.regen_to_tmin_s);
    let regen_tset = regen_or_dash(res.regen_to_tset_s);
    format!(
        "P mínima = {p_ord:.1} [kW] (pérdidas: {loss:.2} [kW])
- Incumplimiento de confort: {violation:.1} [min]
- Temperatura mínima alcanzada: {t_min:.1} [°C] (a las {t_min_at:.1} h)
- Regeneración hasta T_min: {regen_tmin}
- Regeneración hasta consigna: {regen_tset}"
    )
}

impl AsPlain for ComparisonResult {
    /// Está mostrando únicamente los resultados
    fn to_plain(&self) -> String {
        let p_avg = self.p_avg_kw;
        let e_acs = self.e_acs_kwh;
        let delta_p = self.delta_p_kw;
        let delta_pct = self.delta_p_pct;

        let mixed_block = model_block(&self.mixed);
        let layered_block = model_block(&self.layered);

        let level = self.recommendation.level;
        let rec_title = &self.recommendation.title;
        let rec_text = &self.recommendation.text;
        let hint_out = match &self.recommendation.economic_hint {
            Some(hint) => format!("\n{hint}"),
            None => String::new(),
        };

        let fin_commentary = &self.financial.commentary;
        let extra_month = self.financial.extra_cost_month;
        let extra_year = self.financial.extra_cost_year;
        let extra_total = self.financial.extra_cost_total;

        let dec_title = &self.decision.title;
        let p_final = self.decision.p_ord_final_kw;
        let basis = self.decision.basis;
        let dec_text = &self.decision.text;

        let commentary = &self.commentary;

        format!(
            "** Comparación de modelos de ACS

P_media = {p_avg:.2} [kW]
E_ACS = {e_acs:.2} [kWh]

** Modelo idealmente mezclado:

{mixed_block}

** Modelo estratificado (2 zonas):

{layered_block}

** Diferencia de potencias:

ΔP = {delta_p:.2} [kW] (≈ {delta_pct:.1} [%])

** Recomendación [{level}] {rec_title}:

{rec_text}{hint_out}

** Impacto financiero:

{fin_commentary}

- Coste mensual de la potencia en exceso: {extra_month:.0} [€]
- Coste anual de la potencia en exceso: {extra_year:.0} [€]
- Coste en el horizonte de análisis: {extra_total:.0} [€]

** {dec_title}:

P = {p_final:.1} [kW] (justificación {basis})

{dec_text}

** Comentario de ingeniería:

{commentary}
"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{compare_models, reference_daily_profile};
    use crate::types::{LossInput, SearchParams, TankParams};

    #[test]
    fn plain_report_carries_all_blocks() {
        let tank = TankParams {
            volume_l: 800.0,
            t_init_c: 55.0,
            t_set_c: 55.0,
            t_cold_c: 10.0,
            t_min_c: 45.0,
            dt_s: 60,
        };
        let demand = reference_daily_profile();
        let loss = LossInput {
            loss_kw: Some(0.2),
            ..Default::default()
        };
        let res = compare_models(
            &tank,
            &demand,
            &loss,
            0.0,
            None,
            None,
            None,
            &SearchParams::default(),
        )
        .unwrap();
        let plain = res.to_plain();
        assert!(plain.contains("** Comparación de modelos de ACS"));
        assert!(plain.contains("** Modelo idealmente mezclado:"));
        assert!(plain.contains("** Modelo estratificado (2 zonas):"));
        assert!(plain.contains("ΔP ="));
        assert!(plain.contains("** Recomendación ["));
        assert!(plain.contains("** POTENCIA CONTRATADA RECOMENDADA:"));
    }
}
