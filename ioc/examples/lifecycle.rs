use fibre_inject::{component, Context, ContextConfig, HookError, Initializable, Inject, Releasable};

struct Pool {
  size: usize,
}

impl Releasable for Pool {
  fn release(&self) {
    println!("pool: closing {} connections", self.size);
  }
}

#[derive(Default)]
struct Orders {
  pool: Inject<Pool>,
}

impl Initializable for Orders {
  fn after_inject(&self) -> Result<(), HookError> {
    let pool = self.pool.get().ok_or("pool was not injected")?;
    println!("orders: ready with a pool of {}", pool.size);
    Ok(())
  }
}

impl Releasable for Orders {
  fn release(&self) {
    println!("orders: draining");
  }
}

component! {
  Pool;
  hooks { release };
}
component! {
  Orders;
  inject { pool };
  hooks { after_inject, release };
}

fn main() -> fibre_inject::Result<()> {
  // Default names become short type names ("Orders" instead of "lifecycle::Orders").
  let config = ContextConfig::from_yaml_str("naming: type_name")?;
  let mut context = Context::with_config(config);

  context.add(Orders::default())?;
  context.add(Pool { size: 8 })?;
  context.start()?;

  for element in context.initialization_order() {
    println!("initialized {}", element);
  }

  // Orders is released before the pool it depends on.
  context.stop();
  Ok(())
}
