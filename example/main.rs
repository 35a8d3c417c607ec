use h1_assemble::{message::Limit, request::Request};
use std::io::{self, Read};

fn main() -> io::Result<()> {
    env_logger::init();

    let mut input = Vec::new();
    match std::env::args().nth(1) {
        Some(path) => input = std::fs::read(path)?,
        None => {
            io::stdin().read_to_end(&mut input)?;
        }
    }

    let req = match Request::parse(input, Limit::default()) {
        Ok(req) => req,
        Err(err) => {
            eprintln!("rejected: {err}");
            std::process::exit(1);
        }
    };

    println!("> {} {} {}", req.method(), req.uri(), req.version());
    for (name, value) in req.headers() {
        println!("> {}: {}", name.as_str(), String::from_utf8_lossy(value.as_bytes()));
    }
    if !req.body().is_empty() {
        println!("{}", String::from_utf8_lossy(req.body()));
    }

    print!("{req}");
    Ok(())
}
