use clap::Parser;
use nzcp::pass::{PassVerifier, PassVerifierOptions};
use nzcp::store::NZCP_TEST_ISSUER;
use std::error::Error;

#[derive(Parser)]
#[command(author, version, long_about = None,
    about = "Decode and verify an NZ COVID pass string, printing the \
    claims it carries")]
struct Cli {
    /// The pass payload, e.g. "NZCP:/1/2KCEVIQEIVVWK6..."
    pass: String,

    /// Trust an additional issuer (repeatable)
    #[arg(short, long)]
    issuer: Vec<String>,

    /// Also trust the test issuer used by the specification examples
    #[arg(long)]
    allow_test_issuer: bool,

    /// Unix time to validate against instead of the current time
    #[arg(long)]
    at: Option<i64>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match verify(&cli) {
        Ok(()) => println!("verification successful"),
        Err(e) => {
            eprintln!("verification failed: {e}");
            std::process::exit(1);
        }
    }
}

fn verify(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut options = PassVerifierOptions::default();
    options.valid_issuers.extend(cli.issuer.iter().cloned());
    if cli.allow_test_issuer {
        options.valid_issuers.push(NZCP_TEST_ISSUER.to_string());
    }

    let verifier = PassVerifier::new(options);
    let token = verifier.verify(&cli.pass, cli.at)?;

    let payload = &token.payload;
    println!("issuer:    {}", payload.issuer().unwrap_or("-"));
    println!("token id:  {}", payload.token_id().unwrap_or_default());
    if let (Some(not_before), Some(expiry)) = (payload.not_before(), payload.expiry()) {
        println!("valid:     {not_before} .. {expiry} (unix seconds)");
    }

    if let Some(credential) = payload.credential() {
        let subject = credential.credential_subject;
        match &subject.family_name {
            Some(family_name) => println!("subject:   {} {}", subject.given_name, family_name),
            None => println!("subject:   {}", subject.given_name),
        }
        println!("dob:       {}", subject.date_of_birth);
    }

    Ok(())
}
