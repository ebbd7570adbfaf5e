use std::env;
use std::io::{self, Write};
use std::process;

use cpu_scheduling_simulator::input::{InputSource, Prompter, StdinSource};
use cpu_scheduling_simulator::{
    config, logger, AlgorithmKind, MenuChoice, MetricsCalculator, RoundRobinAdmission, Simulation,
    SimulationReport, WorkloadConfig, WorkloadError,
};

/// Formato de salida del modo por lotes.
#[derive(Clone, Copy, Debug, PartialEq)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

/// Algoritmo pedido en la línea de comandos.
#[derive(Clone, Copy, Debug, PartialEq)]
enum AlgorithmArg {
    One(AlgorithmKind),
    All,
}

/// Opciones del modo por lotes.
#[derive(Debug)]
struct BatchOptions {
    workload: String,
    algorithm: Option<AlgorithmArg>,
    quantum: Option<i64>,
    admission: Option<RoundRobinAdmission>,
    format: OutputFormat,
}

const USAGE: &str = "Uso:
  cpu-scheduling-simulator
      Modo interactivo (menú).
  cpu-scheduling-simulator --workload <archivo.toml> [--algorithm fcfs|sjf|srt|rr|all]
                           [--quantum N] [--admission upfront|on-arrival] [--json | --csv]
      Ejecuta la carga de trabajo del archivo.";

/// Toma el valor que sigue a una opción.
fn take_value<'a>(args: &'a [String], idx: &mut usize, flag: &str) -> Result<&'a str, String> {
    *idx += 1;
    args.get(*idx)
        .map(String::as_str)
        .ok_or_else(|| format!("Falta valor para {}", flag))
}

/// Parseo de CLI. `None` indica modo interactivo.
fn parse_args(args: &[String]) -> Result<Option<BatchOptions>, String> {
    if args.len() <= 1 {
        return Ok(None);
    }

    let mut workload = None;
    let mut algorithm = None;
    let mut quantum = None;
    let mut admission = None;
    let mut format = OutputFormat::Text;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--workload" | "-w" => {
                workload = Some(take_value(args, &mut i, "--workload")?.to_string());
            }
            "--algorithm" | "-a" => {
                let name = take_value(args, &mut i, "--algorithm")?;
                algorithm = Some(if name.eq_ignore_ascii_case("all") {
                    AlgorithmArg::All
                } else {
                    AlgorithmArg::One(
                        AlgorithmKind::from_name(name)
                            .ok_or_else(|| format!("Algoritmo desconocido: {}", name))?,
                    )
                });
            }
            "--quantum" | "-q" => {
                let text = take_value(args, &mut i, "--quantum")?;
                let q: i64 = text
                    .parse()
                    .map_err(|_| format!("Quantum inválido: {}", text))?;
                quantum = Some(q);
            }
            "--admission" => {
                let name = take_value(args, &mut i, "--admission")?;
                admission = Some(
                    RoundRobinAdmission::from_name(name)
                        .ok_or_else(|| format!("Admisión desconocida: {}", name))?,
                );
            }
            "--json" => format = OutputFormat::Json,
            "--csv" => format = OutputFormat::Csv,
            other => return Err(format!("Argumento desconocido: {}", other)),
        }
        i += 1;
    }

    let workload = workload.ok_or_else(|| "Falta --workload".to_string())?;
    Ok(Some(BatchOptions {
        workload,
        algorithm,
        quantum,
        admission,
        format,
    }))
}

/// Ejecuta el modo por lotes sobre un archivo de carga de trabajo.
fn run_batch(options: &BatchOptions) -> Result<(), WorkloadError> {
    let workload = WorkloadConfig::load(&options.workload)?;
    let admission = match options.admission {
        Some(admission) => admission,
        None => workload.admission()?,
    };
    let quantum = options.quantum.or(workload.quantum);

    // La línea de comandos tiene prioridad sobre el archivo; FCFS por defecto
    let kind = match options.algorithm {
        Some(AlgorithmArg::All) => None,
        Some(AlgorithmArg::One(kind)) => Some(kind),
        None => Some(workload.kind()?.unwrap_or(AlgorithmKind::Fcfs)),
    };

    let reports: Vec<SimulationReport> = match kind {
        None => Simulation::compare(
            workload.specs(),
            quantum.unwrap_or(config::DEFAULT_QUANTUM),
            admission,
        )?,
        Some(kind) => {
            let q = match quantum {
                Some(q) => q,
                None if kind.needs_quantum() => return Err(WorkloadError::MissingQuantum),
                None => config::DEFAULT_QUANTUM,
            };
            let algorithm = kind.build(q, admission)?;
            vec![Simulation::with_processes(workload.specs().to_vec(), algorithm).run()?]
        }
    };

    print_reports(&reports, options.format);
    Ok(())
}

fn print_reports(reports: &[SimulationReport], format: OutputFormat) {
    let calculator = MetricsCalculator::new();
    for report in reports {
        match format {
            OutputFormat::Text => println!(
                "{}",
                calculator.generate_report(
                    &report.algorithm.to_string(),
                    &report.timeline,
                    &report.metrics
                )
            ),
            OutputFormat::Csv => {
                println!("# {}", report.algorithm);
                print!("{}", calculator.generate_csv_report(&report.metrics));
            }
            OutputFormat::Json => match report.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error: no se pudo serializar el reporte: {}", e),
            },
        }
    }
}

fn print_menu<I: InputSource, W: Write>(prompter: &mut Prompter<I, W>) {
    prompter.say("\n=========== Simulador de Planificación de CPU ===========");
    prompter.say("1. First-Come, First-Served (FCFS)");
    prompter.say("2. Shortest-Job-First (SJF)");
    prompter.say("3. Shortest-Remaining-Time (SRT)");
    prompter.say("4. Round Robin (RR)");
    prompter.say("==========================================================");
    prompter.say("5. Salir");
    prompter.say("==========================================================");
}

/// Bucle interactivo del menú principal.
fn run_interactive() {
    let mut prompter = Prompter::new(StdinSource::new(), io::stdout());

    loop {
        print_menu(&mut prompter);

        let kind = match prompter.ask_menu_choice() {
            Some(MenuChoice::Run(kind)) => kind,
            Some(MenuChoice::Exit) | None => {
                prompter.say("Saliendo del programa...");
                break;
            }
        };

        let specs = match prompter.ask_processes() {
            Some(specs) => specs,
            None => break,
        };

        let quantum = if kind.needs_quantum() {
            match prompter.ask_quantum() {
                Some(q) => q,
                None => break,
            }
        } else {
            config::DEFAULT_QUANTUM
        };

        let simulation = match kind.build(quantum, RoundRobinAdmission::default()) {
            Ok(algorithm) => Simulation::with_processes(specs, algorithm),
            Err(e) => {
                prompter.say(&format!("Error: {}", e));
                continue;
            }
        };
        prompter.say(&format!(
            "\nEjecutando {} sobre {} procesos",
            simulation.algorithm().description(),
            simulation.processes().len()
        ));

        let result = simulation
            .run()
            .map(|report| simulation.generate_report(&report));

        match result {
            Ok(text) => prompter.say(&text),
            Err(e) => prompter.say(&format!("Error: {}", e)),
        }

        if !prompter.pause("\nPresione Enter para continuar...") {
            break;
        }
    }
}

fn main() {
    logger::init();

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("{}\nError: {}", USAGE, e);
        process::exit(1);
    });

    match options {
        None => run_interactive(),
        Some(options) => {
            if let Err(e) = run_batch(&options) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
}
