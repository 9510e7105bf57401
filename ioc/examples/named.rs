use fibre_inject::{component, Context, Inject};

// --- Abstraction and Implementations ---
trait MessageSender {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

// Two senders of the same capability: fields pick theirs by name.
#[derive(Default)]
struct Notifier {
  email: Inject<dyn MessageSender>,
  sms: Inject<dyn MessageSender>,
}

component!(EmailSender as dyn MessageSender;);
component!(SmsSender as dyn MessageSender;);
component! {
  Notifier;
  inject { email = "email", sms = "sms" };
}

fn main() -> fibre_inject::Result<()> {
  // --- Registration ---
  let mut context = Context::new();
  context.add_with_name(EmailSender, "email")?;
  context.add_with_name(SmsSender, "sms")?;
  context.add(Notifier::default())?;
  context.start()?;

  // --- Resolution ---
  // By type alone the capability is ambiguous...
  let ambiguous = context.get_by_type::<dyn MessageSender>();
  println!("By type: {}", ambiguous.err().map(|e| e.to_string()).unwrap_or_default());

  // ...but a name narrows it down.
  let sms = context.get_by_name_and_type::<dyn MessageSender>("sms")?;
  println!("{}", sms.send("+123456789", "Hello from Fibre!"));

  let notifier = context.get_by_type::<Notifier>()?;
  if let (Some(email), Some(sms)) = (notifier.email.get(), notifier.sms.get()) {
    let result1 = email.send("test@example.com", "Hello from Fibre!");
    let result2 = sms.send("+123456789", "Hello from Fibre!");
    println!("{}", result1);
    println!("{}", result2);
    assert!(result1.contains("email"));
    assert!(result2.contains("SMS"));
  }

  Ok(())
}
