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

use crate::types::common::{DecisionBasis, Level, ModelKind};
use crate::types::thresholds::Thresholds;

// ==================== Resultados (results)

// -------------------- ModelRunResult

/// Resultado de una simulación de depósito a potencia de aporte fija
///
/// Se genera uno por evaluación del simulador y recoge las series completas
/// para representación, además de los indicadores de confort y regeneración.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRunResult {
    /// Modelo físico empleado
    pub model: ModelKind,
    /// Potencia de aporte evaluada / resuelta [kW]
    pub p_ord_kw: f64,
    /// Potencia de pérdidas aplicada [kW]
    pub loss_kw: f64,
    /// Instantes de cada paso [s]
    pub time_s: Vec<u32>,
    /// Serie de temperatura primaria (mezclado: depósito; estratificado: zona caliente) [°C]
    pub t_primary_c: Vec<f64>,
    /// Serie de temperatura de la zona fría (solo modelo estratificado) [°C]
    pub t_secondary_c: Option<Vec<f64>>,
    /// Serie de potencia de aporte [kW]
    pub p_in_kw: Vec<f64>,
    /// Duración acumulada del incumplimiento del criterio de confort [min]
    pub violation_min: f64,
    /// Tiempo de regeneración desde el mínimo hasta la temperatura mínima admisible [s]
    pub regen_to_tmin_s: Option<u32>,
    /// Tiempo de regeneración desde el mínimo hasta la consigna [s]
    pub regen_to_tset_s: Option<u32>,
    /// Instante en que se alcanza la temperatura mínima [s]
    pub t_min_temp_s: u32,
    /// Temperatura mínima alcanzada [°C]
    pub t_min_reached_c: f64,
}

// -------------------- ProfileMetrics

/// Métricas del perfil de demanda (explícitas y trazables ante auditoría)
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetrics {
    /// Caudal máximo de la demanda [l/min]
    pub max_lpm: f64,
    /// Caudal medio de la demanda [l/min]
    pub avg_lpm: f64,
    /// Umbral de caudal que define pico [l/min]
    pub peak_threshold_lpm: f64,
    /// Número de segmentos de pico detectados
    pub peaks_count: usize,
    /// Duración del pico más largo [min]
    pub peak_max_duration_min: f64,
    /// Fracción del volumen total demandado dentro de picos [-]
    pub peak_energy_share: f64,
}

// -------------------- RecMetrics

/// Métricas auxiliares de la recomendación, para informe y presentación
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecMetrics {
    /// Métricas del perfil de demanda
    pub profile: ProfileMetrics,
    /// Capacidad del depósito en horas de consumo medio [h]
    pub tank_capacity_hours_at_avg: f64,
    /// Constante de tiempo de mezcla considerada [s]
    pub stratification_tau_s: f64,
    /// El perfil presenta picos cortos
    pub is_short_peaks: bool,
    /// El depósito es grande en relación al consumo medio
    pub is_large_tank: bool,
    /// La estratificación supuesta es buena
    pub stratification_good: bool,
    /// Umbrales empleados en la clasificación
    pub thresholds: Thresholds,
}

// -------------------- Recommendation

/// Recomendación doctrinal generada por la comparación de modelos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Nivel de la recomendación
    pub level: Level,
    /// Título del nivel
    pub title: String,
    /// Texto del informe citando los criterios activados
    pub text: String,
    /// Indicación del potencial económico, si ΔP > 0
    pub economic_hint: Option<String>,
    /// Métricas auxiliares empleadas
    pub metrics: RecMetrics,
}

// -------------------- FinancialImpact

/// Impacto financiero del sobredimensionado de la potencia contratada
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialImpact {
    /// Coste mensual de la potencia en exceso [€]
    pub extra_cost_month: f64,
    /// Coste anual de la potencia en exceso [€]
    pub extra_cost_year: f64,
    /// Coste en el horizonte de análisis [€]
    pub extra_cost_total: f64,
    /// Comentario económico para el informe
    pub commentary: String,
    /// Datos de coste anual para gráfico de barras
    pub cost_bar_year: Vec<BarItem>,
}

// -------------------- Decision

/// Decisión final de potencia contratada con su justificación
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Nivel de la recomendación
    pub level: Level,
    /// Color de severidad para presentación (verde / amarillo / rojo)
    pub color: String,
    /// Título del bloque de decisión
    pub title: String,
    /// Potencia del modelo idealmente mezclado [kW]
    pub p_ord_mixed_kw: f64,
    /// Potencia del modelo estratificado [kW]
    pub p_ord_layered_kw: f64,
    /// Potencia contratada recomendada [kW]
    pub p_ord_final_kw: f64,
    /// Fundamento de la decisión
    pub basis: DecisionBasis,
    /// Texto de justificación para el informe
    pub text: String,
    /// Filas de la tabla de decisión (técnica → decisión)
    pub rows: Vec<BarItem>,
}

// -------------------- PlotSeries / BarItem

/// Series temporales agrupadas para representación gráfica
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotSeries {
    /// Instantes de cada paso [s]
    pub time_s: Vec<u32>,
    /// Temperatura del depósito en el modelo mezclado [°C]
    pub t_tank_mixed_c: Vec<f64>,
    /// Temperatura de la zona caliente en el modelo estratificado [°C]
    pub t_hot_layered_c: Vec<f64>,
    /// Temperatura de la zona fría en el modelo estratificado [°C]
    pub t_cold_layered_c: Vec<f64>,
    /// Potencia de aporte del modelo mezclado [kW]
    pub p_in_mixed_kw: Vec<f64>,
    /// Potencia de aporte del modelo estratificado [kW]
    pub p_in_layered_kw: Vec<f64>,
}

/// Elemento etiquetado de gráfico o tabla (sustituye a los diccionarios
/// dinámicos de presentación por un registro tipado)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarItem {
    /// Etiqueta del elemento
    pub label: String,
    /// Valor numérico
    pub value: f64,
    /// Nota aclaratoria
    pub note: String,
}

// -------------------- ComparisonResult

/// Resultado completo de la comparación de modelos
///
/// Agregado plano y serializable que consumen las capas de presentación
/// (API, panel interactivo, informe). Se construye una vez por evaluación y
/// no se modifica después.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Potencia media de la demanda de ACS [kW]
    pub p_avg_kw: f64,
    /// Energía total demandada de ACS [kWh]
    pub e_acs_kwh: f64,
    /// Resultado del modelo idealmente mezclado (a potencia mínima)
    pub mixed: ModelRunResult,
    /// Resultado del modelo estratificado (a potencia mínima)
    pub layered: ModelRunResult,
    /// Diferencia de potencias ΔP = P_mezclado − P_estratificado [kW]
    pub delta_p_kw: f64,
    /// Diferencia de potencias en porcentaje sobre el modelo estratificado [%]
    pub delta_p_pct: f64,
    /// Recomendación doctrinal
    pub recommendation: Recommendation,
    /// Impacto financiero del sobredimensionado
    pub financial: FinancialImpact,
    /// Decisión final de potencia contratada
    pub decision: Decision,
    /// Series para representación gráfica
    pub series: PlotSeries,
    /// Datos de potencias para gráfico de barras
    pub power_bar: Vec<BarItem>,
    /// Comentario de ingeniería para el informe
    pub commentary: String,
}
