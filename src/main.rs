use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    network_chat::cli::main()
}
