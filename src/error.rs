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
Errores (errors)
================

Tipos de error del cálculo de la potencia contratada para ACS.

*/

use std::fmt;

/// Error del cálculo de dimensionado
#[derive(Debug)]
pub enum AcsDimError {
    /// Error al interpretar un valor textual
    ParseError(String),
    /// Dato de entrada incorrecto (error de configuración, fatal)
    WrongInput(String),
    /// Búsqueda de potencia mínima agotada sin encontrar solución dentro del límite configurado
    SearchExhausted(String),
    /// Inconsistencia interna (inalcanzable si la validación previa es correcta)
    Internal(String),
}

impl fmt::Display for AcsDimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcsDimError::ParseError(detail) => write!(f, "Error de formato: {}", detail),
            AcsDimError::WrongInput(detail) => write!(f, "Dato de entrada incorrecto: {}", detail),
            AcsDimError::SearchExhausted(detail) => {
                write!(f, "Búsqueda de potencia agotada: {}", detail)
            }
            AcsDimError::Internal(detail) => write!(f, "Inconsistencia interna: {}", detail),
        }
    }
}

impl std::error::Error for AcsDimError {}

impl From<std::num::ParseFloatError> for AcsDimError {
    fn from(err: std::num::ParseFloatError) -> Self {
        AcsDimError::ParseError(format!("número incorrecto ({})", err))
    }
}

/// Resultado del cálculo
pub type Result<T> = std::result::Result<T, AcsDimError>;
