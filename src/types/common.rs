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

use std::fmt;
use std::str;

use serde::{Deserialize, Serialize};

use crate::error::AcsDimError;

// ==================== Common types (models + decision)

// -------------------- ModelKind

/// Modelo físico de zonificación del depósito (tank physics model).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// Ideally mixed single-zone tank
    Mixed,
    /// Layered two-zone (stratified) tank
    Layered2Zone,
}

impl str::FromStr for ModelKind {
    type Err = AcsDimError;

    fn from_str(s: &str) -> Result<ModelKind, Self::Err> {
        match s {
            "mixed" => Ok(ModelKind::Mixed),
            "layered_2zone" => Ok(ModelKind::Layered2Zone),
            _ => Err(AcsDimError::ParseError(s.into())),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Mixed => write!(f, "mixed"),
            ModelKind::Layered2Zone => write!(f, "layered_2zone"),
        }
    }
}

// -------------------- Level

/// Nivel de la recomendación (A / B / C)
///
/// Clasificación doctrinal del resultado de la comparación de modelos:
///
/// - A: el modelo idealmente mezclado es suficiente como referencia
/// - B: se recomienda adoptar el resultado del modelo estratificado
/// - C: la diferencia es crítica y el modelo estratificado debe guiar la decisión
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Mixed model sufficient
    A,
    /// Layered model recommended
    B,
    /// Layered model critical
    C,
}

impl Level {
    /// Color de severidad para los paneles de presentación (verde / amarillo / rojo)
    pub fn color(self) -> &'static str {
        match self {
            Level::A => "green",
            Level::B => "yellow",
            Level::C => "red",
        }
    }

    /// Título normalizado del nivel de recomendación
    pub fn title(self) -> &'static str {
        match self {
            Level::A => "Modelo idealmente mezclado suficiente",
            Level::B => "Modelo estratificado recomendado",
            Level::C => "Modelo estratificado crítico",
        }
    }
}

impl str::FromStr for Level {
    type Err = AcsDimError;

    fn from_str(s: &str) -> Result<Level, Self::Err> {
        match s {
            "A" => Ok(Level::A),
            "B" => Ok(Level::B),
            "C" => Ok(Level::C),
            _ => Err(AcsDimError::ParseError(s.into())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// -------------------- LossSplit

/// Reparto de las pérdidas térmicas entre zonas del modelo estratificado
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossSplit {
    /// Split proportionally to zone volume
    ByVolume,
    /// Assign all losses to the hot zone
    AllHot,
}

impl str::FromStr for LossSplit {
    type Err = AcsDimError;

    fn from_str(s: &str) -> Result<LossSplit, Self::Err> {
        match s {
            "by_volume" => Ok(LossSplit::ByVolume),
            "all_hot" => Ok(LossSplit::AllHot),
            _ => Err(AcsDimError::ParseError(s.into())),
        }
    }
}

impl fmt::Display for LossSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossSplit::ByVolume => write!(f, "by_volume"),
            LossSplit::AllHot => write!(f, "all_hot"),
        }
    }
}

impl Default for LossSplit {
    fn default() -> LossSplit {
        LossSplit::ByVolume
    }
}

// -------------------- DecisionBasis

/// Fundamento de la decisión final de potencia contratada
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionBasis {
    /// Purely technical decision
    Technical,
    /// Technical decision with quantified financial impact
    TechnicalFinancial,
}

impl fmt::Display for DecisionBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionBasis::Technical => write!(f, "técnica"),
            DecisionBasis::TechnicalFinancial => write!(f, "técnico-financiera"),
        }
    }
}
