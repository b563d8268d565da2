// Copyright (c) 2018 Ministerio de Fomento
//                    Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

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

// Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>
//            Daniel Jiménez González <danielj@ietcc.csic.es>
//            Marta Sorribes Gil <msorribes@ietcc.csic.es>

#[macro_use]
extern crate clap;

use exitcode;

use serde_json;

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::process::exit;
use std::str::FromStr;

use clap::{App, AppSettings, Arg};
use failure::Error;
use failure::Fail;
use failure::ResultExt;

use acsdim::types::*;
use acsdim::*;

// Funciones auxiliares -----------------------------------------------------------------------

fn readfile(path: &Path) -> Result<String, Error> {
    let mut f = File::open(path).context(format!("Archivo {} no encontrado", path.display()))?;
    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .context("Error al leer el archivo")?;
    Ok(contents)
}

fn writefile(path: &Path, content: &[u8]) {
    let mut file = match File::create(&path) {
        Err(err) => panic!(
            "ERROR: no se ha podido escribir en \"{}\": {:?}",
            path.display(),
            err.cause()
        ),
        Ok(file) => file,
    };
    if let Err(err) = file.write_all(content) {
        panic!(
            "No se ha podido escribir en {}: {:?}",
            path.display(),
            err.cause()
        )
    }
}

/// Interpreta un perfil de demanda: un caudal [l/min] por línea
///
/// Se admiten líneas vacías y comentarios iniciados con '#'
fn parse_profile(profilestring: &str) -> Result<Vec<f64>, Error> {
    let mut demand: Vec<f64> = Vec::new();
    for (i, line) in profilestring.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let value = f64::from_str(line)
            .context(format!("Caudal no numérico en la línea {}: {}", i + 1, line))?;
        demand.push(value);
    }
    Ok(demand)
}

/// Carga el perfil de demanda desde archivo o devuelve el perfil de referencia
fn get_profile(archivo: Option<&str>) -> Vec<f64> {
    if let Some(archivo_perfil) = archivo {
        let path = Path::new(archivo_perfil);
        if let Ok(profilestring) = readfile(path) {
            println!("Perfil de demanda: \"{}\"", path.display());
            match parse_profile(&profilestring) {
                Ok(demand) => demand,
                Err(err) => {
                    eprintln!(
                        "ERROR: Formato incorrecto del archivo de perfil \"{}\" ({})",
                        archivo_perfil,
                        err.as_fail()
                    );
                    exit(exitcode::DATAERR);
                }
            }
        } else {
            eprintln!(
                "ERROR: No se ha podido leer el archivo de perfil de demanda {}",
                path.display()
            );
            exit(exitcode::IOERR);
        }
    } else {
        println!("Perfil de demanda: referencia de 24 h (picos de mañana y tarde)");
        reference_daily_profile()
    }
}

/// Obtiene un argumento f64 opcional, con validación numérica
fn get_f64_opt(matches: &clap::ArgMatches<'_>, name: &str) -> Option<f64> {
    if matches.is_present(name) {
        let value = value_t!(matches, name, f64).unwrap_or_else(|error| {
            eprintln!("ERROR: El valor de --{} no es numérico", name);
            println!("{}", error);
            exit(exitcode::DATAERR);
        });
        Some(value)
    } else {
        None
    }
}

// Función principal ------------------------------------------------------------------------------

fn main() {
    let matches = App::new("AcsDim")
        .bin_name("acsdim")
        .version(env!("CARGO_PKG_VERSION"))
        .author("
Copyright (c) 2018 Ministerio de Fomento,
                   Instituto de CC. de la Construcción Eduardo Torroja (IETcc-CSIC)

Autores: Rafael Villar Burke <pachi@ietcc.csic.es>,
         Daniel Jiménez González <danielj@ietcc.csic.es>
         Marta Sorribes Gil <msorribes@ietcc.csic.es>

Licencia: Publicado bajo licencia MIT.

")
        .about("AcsDim - Dimensionado de la potencia de depósitos de ACS por comparación de modelos.")
        .setting(AppSettings::NextLineHelp)
        .arg(Arg::with_name("volumen")
            .short("V")
            .long("volumen")
            .value_name("VOLUMEN")
            .default_value("800")
            .help("Volumen del depósito [l]")
            .takes_value(true)
            .display_order(1))
        .arg(Arg::with_name("tset")
            .long("tset")
            .value_name("T_SET")
            .default_value("55")
            .help("Temperatura de consigna [°C]")
            .takes_value(true)
            .display_order(2))
        .arg(Arg::with_name("tcold")
            .long("tcold")
            .value_name("T_COLD")
            .default_value("10")
            .help("Temperatura del agua fría [°C]")
            .takes_value(true)
            .display_order(3))
        .arg(Arg::with_name("tmin")
            .long("tmin")
            .value_name("T_MIN")
            .default_value("45")
            .help("Temperatura mínima admisible (confort) [°C]")
            .takes_value(true)
            .display_order(4))
        .arg(Arg::with_name("tinit")
            .long("tinit")
            .value_name("T_INIT")
            .help("Temperatura inicial del depósito [°C] (consigna si no se indica)")
            .takes_value(true)
            .display_order(5))
        .arg(Arg::with_name("dt")
            .long("dt")
            .value_name("DT")
            .default_value("60")
            .help("Paso de cálculo [s]")
            .takes_value(true)
            .display_order(6))
        .arg(Arg::with_name("archivo_perfil")
            .short("p")
            .long("archivo_perfil")
            .value_name("ARCHIVO_PERFIL")
            .help("Archivo del perfil de demanda (un caudal [l/min] por línea)")
            .takes_value(true)
            .display_order(7))
        .arg(Arg::with_name("perdidas_kw")
            .long("perdidas_kw")
            .value_name("PERDIDAS_KW")
            .conflicts_with_all(&["perdidas_pct", "ua"])
            .help("Pérdidas del depósito como potencia constante [kW]")
            .takes_value(true)
            .display_order(8))
        .arg(Arg::with_name("perdidas_pct")
            .long("perdidas_pct")
            .value_name("PERDIDAS_PCT")
            .conflicts_with_all(&["perdidas_kw", "ua"])
            .help("Pérdidas del depósito como porcentaje de la potencia media [%]")
            .takes_value(true)
            .display_order(9))
        .arg(Arg::with_name("ua")
            .long("ua")
            .value_names(&["UA_W_K", "DELTA_T_K"])
            .conflicts_with_all(&["perdidas_kw", "perdidas_pct"])
            .help("Pérdidas como UA·ΔT: coeficiente [W/K] y salto térmico fijo [K].\nP.e.: --ua 12 35")
            .takes_value(true)
            .number_of_values(2)
            .display_order(10))
        .arg(Arg::with_name("incumplimiento")
            .long("incumplimiento")
            .value_name("INCUMPLIMIENTO")
            .default_value("0")
            .help("Presupuesto de incumplimiento de confort admitido [min]")
            .takes_value(true)
            .display_order(11))
        .arg(Arg::with_name("fraccion_caliente")
            .long("fraccion_caliente")
            .value_name("FRACCION_CALIENTE")
            .help("Fracción del volumen de la zona caliente [0.05, 0.95]")
            .takes_value(true)
            .display_order(12))
        .arg(Arg::with_name("tau_mezcla")
            .long("tau_mezcla")
            .value_name("TAU_MEZCLA")
            .help("Constante de tiempo de mezcla entre zonas [s]")
            .takes_value(true)
            .display_order(13))
        .arg(Arg::with_name("reparto_perdidas")
            .long("reparto_perdidas")
            .value_name("REPARTO_PERDIDAS")
            .possible_values(&["by_volume", "all_hot"])
            .help("Reparto de pérdidas entre zonas del modelo estratificado\n")
            .takes_value(true)
            .display_order(14))
        .arg(Arg::with_name("coste_kw_mes")
            .long("coste_kw_mes")
            .value_name("COSTE_KW_MES")
            .help("Coste mensual de la potencia contratada [€/kW·mes]")
            .takes_value(true)
            .display_order(15))
        .arg(Arg::with_name("coste_kw_anyo")
            .long("coste_kw_anyo")
            .value_name("COSTE_KW_ANYO")
            .help("Coste anual de la potencia contratada [€/kW·año]")
            .takes_value(true)
            .display_order(16))
        .arg(Arg::with_name("horizonte")
            .long("horizonte")
            .value_name("HORIZONTE")
            .default_value("10")
            .help("Horizonte del análisis financiero [años]")
            .takes_value(true)
            .display_order(17))
        .arg(Arg::with_name("archivo_salida_json")
            .long("json")
            .value_name("ARCHIVO_SALIDA_JSON")
            .help("Archivo de salida de resultados detallados en formato JSON")
            .takes_value(true))
        .arg(Arg::with_name("archivo_salida_plain")
            .short("o")
            .long("output")
            .value_name("ARCHIVO_SALIDA")
            .help("Archivo de salida del informe en formato simple")
            .takes_value(true))
        .arg(Arg::with_name("showlicense")
            .short("L")
            .long("licencia")
            .help("Muestra la licencia del programa (MIT)"))
        .arg(Arg::with_name("v")
            .short("v")
            .multiple(true)
            .help("Sets the level of verbosity"))
        .get_matches();

    if matches.is_present("showlicense") {
        println!(
            "
Copyright (c) 2018 Ministerio de Fomento
                   Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the 'Software'), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in
all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED 'AS IS', WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.

Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>
            Daniel Jiménez González <danielj@ietcc.csic.es>
            Marta Sorribes Gil <msorribes@ietcc.csic.es>"
        );
        exit(exitcode::OK);
    }

    // Prólogo ------------------------------------------------------------------------------------

    let verbosity = matches.occurrences_of("v");

    if verbosity > 2 {
        println!("Opciones indicadas: ----------");
        println!("{:#?}", matches);
        println!("------------------------------");
    }

    println!("** Datos de entrada");

    // Depósito -----------------------------------------------------------------------------------
    let t_set_c = value_t!(matches, "tset", f64).unwrap_or_else(|e| e.exit());
    let tank = TankParams {
        volume_l: value_t!(matches, "volumen", f64).unwrap_or_else(|e| e.exit()),
        t_init_c: get_f64_opt(&matches, "tinit").unwrap_or(t_set_c),
        t_set_c,
        t_cold_c: value_t!(matches, "tcold", f64).unwrap_or_else(|e| e.exit()),
        t_min_c: value_t!(matches, "tmin", f64).unwrap_or_else(|e| e.exit()),
        dt_s: value_t!(matches, "dt", u32).unwrap_or_else(|e| e.exit()),
    };
    println!(
        "Depósito: {:.0} l, consigna {:.1} °C, confort {:.1} °C, agua fría {:.1} °C",
        tank.volume_l, tank.t_set_c, tank.t_min_c, tank.t_cold_c
    );

    // Perfil de demanda --------------------------------------------------------------------------
    let demand = get_profile(matches.value_of("archivo_perfil"));
    if verbosity > 1 {
        println!(
            "Perfil: {} pasos de {} s, caudal máximo {:.1} l/min",
            demand.len(),
            tank.dt_s,
            demand.iter().cloned().fold(0.0, f64::max)
        );
    }

    // Pérdidas -----------------------------------------------------------------------------------
    let ua_values: Option<Vec<f64>> = matches.values_of("ua").map(|vals| {
        vals.map(|v| {
            f64::from_str(v.trim()).unwrap_or_else(|_| {
                eprintln!("ERROR: valor no numérico en --ua: {}", v);
                exit(exitcode::DATAERR);
            })
        })
        .collect()
    });
    let loss = LossInput {
        loss_kw: get_f64_opt(&matches, "perdidas_kw"),
        loss_pct_of_pavg: get_f64_opt(&matches, "perdidas_pct"),
        ua_w_per_k: ua_values.as_ref().map(|v| v[0]),
        delta_t_k: ua_values.as_ref().map(|v| v[1]),
    };

    // Estratificación ----------------------------------------------------------------------------
    let mut layered = LayeredParams::default();
    if let Some(hot_fraction) = get_f64_opt(&matches, "fraccion_caliente") {
        layered.hot_fraction = hot_fraction;
    }
    if let Some(tau) = get_f64_opt(&matches, "tau_mezcla") {
        layered.mixing_tau_s = tau;
    }
    if let Some(split) = matches.value_of("reparto_perdidas") {
        layered.losses_split = split.parse().unwrap_or_else(|error| {
            eprintln!("ERROR: {}", error);
            exit(exitcode::DATAERR);
        });
    }

    // Costes -------------------------------------------------------------------------------------
    let cost = CostParams {
        cost_kw_month: get_f64_opt(&matches, "coste_kw_mes"),
        cost_kw_year: get_f64_opt(&matches, "coste_kw_anyo"),
        horizon_years: value_t!(matches, "horizonte", u32).unwrap_or_else(|e| e.exit()),
    };

    let allowed_violation_min =
        value_t!(matches, "incumplimiento", f64).unwrap_or_else(|e| e.exit());

    // Comparación de modelos ---------------------------------------------------------------------
    let result = compare_models(
        &tank,
        &demand,
        &loss,
        allowed_violation_min,
        Some(&layered),
        None,
        Some(&cost),
        &SearchParams::default(),
    )
    .unwrap_or_else(|error| {
        eprintln!("ERROR: No se ha podido completar la comparación de modelos");
        eprintln!("{}", error);
        exit(exitcode::DATAERR);
    });

    // Salida de resultados ------------------------------------------------------------------------

    // Guardar resultado en formato json
    if matches.is_present("archivo_salida_json") {
        let path = Path::new(matches.value_of_os("archivo_salida_json").unwrap());
        if verbosity > 0 {
            println!("Resultados en formato JSON: {:?}", path.display());
        }
        let json = serde_json::to_string_pretty(&result).unwrap_or_else(|error| {
            eprintln!("ERROR: No se ha podido convertir el resultado al formato JSON");
            if verbosity > 2 {
                println!("{:?}", error)
            };
            exit(exitcode::DATAERR);
        });
        writefile(&path, json.as_bytes());
    }

    // Guardar informe en formato plain
    if matches.is_present("archivo_salida_plain") {
        let path = Path::new(matches.value_of_os("archivo_salida_plain").unwrap());
        if verbosity > 0 {
            println!("Informe en formato simple: {:?}", path.display());
        }
        writefile(&path, result.to_plain().as_bytes());
    }

    // Mostrar siempre en formato plain
    println!("{}", result.to_plain());
}
