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
AcsDim
======

This crate provides a library and binary to **size the heating power of domestic
hot water (DHW) storage tanks** by comparing two physical tank models: an
ideally mixed single-zone tank and a stratified two-zone tank.

For each model it finds, by geometric expansion and bisection, the minimal
constant heating power that keeps the comfort criterion (tank temperature above
a minimum) within an allowed violation budget. The power gap between models is
then classified into advisory levels, translated into contracted-power costs
and composed into a single documented sizing decision.

It holds the following assumptions:

- demand is delivered at the set-point temperature (audit convention)
- stored energy is measured against the cold water inlet temperature
- tank losses act as a constant power, independent of instantaneous demand
- feasibility is monotone non-decreasing with heating power

Este *crate* proporciona una biblioteca y un programa para **dimensionar la
potencia de aporte de depósitos de ACS** comparando dos modelos físicos de
depósito: idealmente mezclado (una zona) y estratificado de dos zonas.

Para cada modelo busca, por expansión geométrica y bisección, la potencia
constante mínima que mantiene el criterio de confort (temperatura del depósito
sobre un mínimo) dentro del presupuesto de incumplimiento admitido. La
diferencia de potencias se clasifica en niveles doctrinales, se traduce a
costes de potencia contratada y se compone en una decisión de dimensionado
única y documentada.

Realiza los siguientes supuestos:

- la demanda se entrega a la temperatura de consigna (convenio de auditoría)
- la energía almacenada se mide respecto a la temperatura del agua fría
- las pérdidas del depósito actúan como potencia constante, independiente del consumo
- la factibilidad es monótona no decreciente con la potencia de aporte

# Ejemplo

```rust
use acsdim::*;
use acsdim::types::*;

// Depósito de 800 l con consigna a 55 °C y confort a 45 °C
let tank = TankParams {
    volume_l: 800.0,
    t_init_c: 55.0,
    t_set_c: 55.0,
    t_cold_c: 10.0,
    t_min_c: 45.0,
    dt_s: 60,
};

// Perfil de referencia de 24 h (picos de mañana y tarde)
let demand = reference_daily_profile();

// Pérdidas del depósito como potencia constante
let loss = LossInput {
    loss_kw: Some(0.2),
    ..Default::default()
};

// Comparación de modelos con parámetros por defecto
let res = compare_models(
    &tank,
    &demand,
    &loss,
    0.0, // sin presupuesto de incumplimiento
    None,
    None,
    None,
    &SearchParams::default(),
)
.unwrap();

// Visualización compacta
println!("{}", res.to_plain());
```

*/

#![deny(missing_docs)]

#[cfg(test)] // <-- not needed in examples + integration tests
#[macro_use]
extern crate pretty_assertions;

mod asplain;
mod compare;
mod demand;
mod finance;
mod losses;
mod model;
mod recommend;
mod search;

pub mod error;
pub mod types;

pub use asplain::*;
pub use compare::*;
pub use demand::*;
pub use finance::*;
pub use losses::*;
pub use model::*;
pub use recommend::*;
pub use search::*;

/// Número de versión de la librería
///
/// Version number
pub static VERSION: &str = env!("CARGO_PKG_VERSION");
