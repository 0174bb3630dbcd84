use std::io;

use mailbox_chess::Engine;

fn main() -> anyhow::Result<()> {
    mailbox_chess::print_engine_info();
    mailbox_chess::print_binary_info();

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    Engine::new(&mut input, &mut output).run()
}
