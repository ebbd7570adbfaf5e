//! # Módulo de Entrada
//!
//! Frontera de entrada del simulador. La fuente de líneas se inyecta a
//! través del trait [`InputSource`]; los analizadores son funciones puras
//! que devuelven `Result`, y los bucles de reintento viven en
//! [`Prompter`], fuera del núcleo de planificación.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::ParseError;
use crate::scheduler::MenuChoice;
use crate::workload::ProcessSpec;

/// Fuente de líneas de texto.
pub trait InputSource {
    /// Lee la siguiente línea sin el salto final; `None` al agotarse.
    fn read_line(&mut self) -> Option<String>;
}

/// Lee líneas de la entrada estándar.
pub struct StdinSource {
    stdin: io::Stdin,
}

impl StdinSource {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for StdinSource {
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.stdin.lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()),
            Err(e) => {
                log::warn!("error leyendo la entrada estándar: {}", e);
                None
            }
        }
    }
}

/// Fuente con líneas predefinidas, útil para pruebas y guiones.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}

fn parse_integer(text: &str) -> Result<i64, ParseError> {
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| ParseError::NotANumber(trimmed.to_string()))
}

/// Interpreta un entero estrictamente positivo.
///
/// ```rust
/// use cpu_scheduling_simulator::input::parse_positive;
///
/// assert_eq!(parse_positive(" 4 "), Ok(4));
/// assert!(parse_positive("0").is_err());
/// assert!(parse_positive("cuatro").is_err());
/// ```
pub fn parse_positive(text: &str) -> Result<i64, ParseError> {
    let value = parse_integer(text)?;
    if value <= 0 {
        return Err(ParseError::OutOfRange(value));
    }
    Ok(value)
}

/// Interpreta un entero mayor o igual a cero.
pub fn parse_non_negative(text: &str) -> Result<i64, ParseError> {
    let value = parse_integer(text)?;
    if value < 0 {
        return Err(ParseError::OutOfRange(value));
    }
    Ok(value)
}

/// Interpreta una opción del menú principal (1-5).
pub fn parse_menu_choice(text: &str) -> Result<MenuChoice, ParseError> {
    let value = parse_integer(text)?;
    MenuChoice::from_number(value).ok_or(ParseError::OutOfRange(value))
}

/// Diálogo interactivo sobre una fuente de entrada y una salida.
///
/// Cada método reintenta hasta obtener un valor válido y devuelve `None`
/// si la entrada se agota.
pub struct Prompter<I, W> {
    input: I,
    output: W,
}

impl<I: InputSource, W: Write> Prompter<I, W> {
    pub fn new(input: I, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (I, W) {
        (self.input, self.output)
    }

    /// Escribe `message` en la salida; los errores de escritura se registran
    /// y se ignoran.
    pub fn say(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{}", message) {
            log::warn!("no se pudo escribir en la salida: {}", e);
        }
    }

    /// Muestra `message` y espera una línea; `false` si la entrada se agotó.
    pub fn pause(&mut self, message: &str) -> bool {
        self.say(message);
        self.input.read_line().is_some()
    }

    fn prompt(&mut self, label: &str) -> Option<String> {
        if write!(self.output, "{}", label).and_then(|_| self.output.flush()).is_err() {
            log::warn!("no se pudo escribir el mensaje '{}'", label.trim());
        }
        self.input.read_line()
    }

    /// Pide un valor hasta que `parse` lo acepte.
    fn ask<T, F>(&mut self, label: &str, hint: &str, parse: F) -> Option<T>
    where
        F: Fn(&str) -> Result<T, ParseError>,
    {
        loop {
            let line = self.prompt(label)?;
            match parse(&line) {
                Ok(value) => return Some(value),
                Err(e) => {
                    log::debug!("entrada rechazada: {}", e);
                    self.say(hint);
                }
            }
        }
    }

    /// Pide la opción del menú principal.
    pub fn ask_menu_choice(&mut self) -> Option<MenuChoice> {
        self.ask(
            "Seleccione una opción (1-5): ",
            "¡Opción inválida! Seleccione 1-5",
            parse_menu_choice,
        )
    }

    /// Pide el quantum de Round Robin.
    pub fn ask_quantum(&mut self) -> Option<i64> {
        self.ask("Quantum: ", "El quantum debe ser positivo", parse_positive)
    }

    /// Pide la cantidad de procesos y la llegada y ráfaga de cada uno.
    ///
    /// Una llegada que no es un entero se vuelve a pedir de inmediato; si
    /// la ráfaga no es un entero, o algún valor está fuera de rango, se
    /// vuelven a pedir ambas para el mismo proceso.
    ///
    /// # Returns
    ///
    /// Las especificaciones en orden de entrada, o `None` si la entrada se
    /// agota antes de completarlas
    pub fn ask_processes(&mut self) -> Option<Vec<ProcessSpec>> {
        let count = self.ask(
            "Cantidad de procesos: ",
            "Ingrese un entero positivo",
            parse_positive,
        )?;

        // La cantidad viene del usuario; no se reserva memoria por adelantado
        let mut specs = Vec::new();
        for i in 1..=count {
            self.say(&format!("\n======== Proceso P{} ========", i));
            specs.push(self.ask_process()?);
        }
        Some(specs)
    }

    fn ask_process(&mut self) -> Option<ProcessSpec> {
        loop {
            let arrival = match parse_non_negative(&self.prompt("Llegada: ")?) {
                Err(ParseError::NotANumber(_)) => {
                    self.say("Ingrese enteros válidos");
                    continue;
                }
                checked => checked,
            };
            let burst = match parse_positive(&self.prompt("Ráfaga: ")?) {
                Err(ParseError::NotANumber(_)) => {
                    self.say("Ingrese enteros válidos");
                    continue;
                }
                checked => checked,
            };
            match (arrival, burst) {
                (Ok(arrival), Ok(burst)) => return Some(ProcessSpec::new(arrival, burst)),
                _ => self.say("La llegada debe ser >= 0 y la ráfaga > 0"),
            }
        }
    }
}
