use fibre_inject::{component, Context, Inject};

// 1. Define the abstraction (the trait)
trait Logger {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service that depends on the abstraction
#[derive(Default)]
struct ReportService {
  logger: Inject<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    if let Some(logger) = self.logger.get() {
      logger.log("Starting report generation.");
      logger.log("Finished report generation.");
    }
  }
}

// ConsoleLogger can be injected wherever a `dyn Logger` is asked for.
component!(ConsoleLogger as dyn Logger;);
component! {
  ReportService;
  inject { logger };
}

fn main() -> fibre_inject::Result<()> {
  // --- Registration ---
  let mut context = Context::new();
  context.add(ConsoleLogger)?;
  context.add(ReportService::default())?;

  // --- Injection ---
  // ReportService never builds its logger: the context hands it one.
  context.start()?;

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = context.get_by_type::<ReportService>()?;

  println!("Using the service...");
  report_service.generate_report();

  context.stop();
  Ok(())
}
