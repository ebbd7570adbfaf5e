//! Ejemplo básico de uso del simulador de planificación de CPU

use cpu_scheduling_simulator::{
    config, logger, MetricsCalculator, ProcessSpec, RoundRobinAdmission, Simulation,
};

fn main() {
    logger::init();

    println!("=== Ejemplo: Comparación de Algoritmos ===\n");

    let workload: Vec<ProcessSpec> = [(0, 8), (1, 4), (2, 9), (3, 5)]
        .iter()
        .map(|&(arrival, burst)| ProcessSpec::new(arrival, burst))
        .collect();

    let reports = match Simulation::compare(&workload, config::DEFAULT_QUANTUM, RoundRobinAdmission::Upfront) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let calculator = MetricsCalculator::new();
    for report in &reports {
        println!(
            "{}",
            calculator.generate_report(&report.algorithm.to_string(), &report.timeline, &report.metrics)
        );
    }

    println!("\n=== Resumen ===");
    println!("| Algoritmo                | Espera prom. | Turnaround prom. | Segmentos |");
    println!("|--------------------------|--------------|------------------|-----------|");
    for report in &reports {
        println!(
            "| {:<24} | {:>12} | {:>16} | {:>9} |",
            report.algorithm.to_string(),
            MetricsCalculator::format_average(report.metrics.average_waiting_time),
            MetricsCalculator::format_average(report.metrics.average_turnaround_time),
            report.timeline.len()
        );
    }
}
