//! CLI tool for the card entry form.
//!
//! # Usage
//!
//! ```bash
//! # Format field values the way the form does while typing
//! cardform format number 378282246310005
//! cardform format expiry 925
//! cardform format cvv 12345 --network amex
//!
//! # Validate one field with the built-in or a JSON rule set
//! cardform validate cardNumber "4111 1111 1111 1111"
//! cardform validate cardExpiryDate 06/25 --today 2025-06
//! cardform validate cardNumber 42 --prefix --rules rules.json
//!
//! # Render the card face
//! cardform preview --number 4111 --expiry 1 --cvv 12
//!
//! # Generate test card numbers
//! cardform generate --network visa --count 5
//! ```
//!
//! Set `RUST_LOG=card_form=debug` to see validation events on stderr.

use card_form::expiry::YearMonth;
use card_form::field::{default_rules, FieldId, FieldRuleSet};
use card_form::validate::{Rule, Validator};
use card_form::{classify, classify_strict, format, generate, luhn, mask, CardNetwork, Strictness};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardform")]
#[command(author, version, about = "Payment card form formatting and validation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a field value as the form would while typing
    Format {
        #[command(subcommand)]
        kind: FormatKind,
    },

    /// Detect the card network from a (partial) number
    Detect {
        /// Card number or prefix
        card_number: String,

        /// Also require a length the network issues
        #[arg(short, long)]
        strict: bool,
    },

    /// Check if a number passes the Luhn algorithm
    Luhn {
        /// Card number to check
        card_number: String,
    },

    /// Validate one field value
    Validate(ValidateArgs),

    /// Render the card face preview
    Preview {
        /// Card number typed so far
        #[arg(short, long, default_value = "")]
        number: String,

        /// Expiry typed so far
        #[arg(short, long, default_value = "")]
        expiry: String,

        /// CVV typed so far
        #[arg(short, long, default_value = "")]
        cvv: String,
    },

    /// Generate test card numbers (for testing only)
    Generate {
        /// Card network to generate
        #[arg(short, long, default_value = "visa")]
        network: NetworkArg,

        /// Number of cards to generate
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Output formatted (with spaces)
        #[arg(short, long)]
        formatted: bool,

        /// Zero-filled numbers instead of random ones
        #[arg(short, long)]
        deterministic: bool,
    },
}

#[derive(Subcommand)]
enum FormatKind {
    /// Card number (grouped per network)
    Number {
        /// Raw input
        raw: String,
    },
    /// Expiry date (MM/YY)
    Expiry {
        /// Raw input
        raw: String,
    },
    /// CVV/CVC
    Cvv {
        /// Raw input
        raw: String,

        /// Card network (affects length)
        #[arg(short, long)]
        network: Option<NetworkArg>,
    },
}

#[derive(Args)]
struct ValidateArgs {
    /// Field id: cardNumber, cardHolder, cardExpiryDate, cardCVVCode (or cardCvc), email
    field: String,

    /// Value to validate
    value: String,

    /// JSON rule-set file (defaults to the built-in rules)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Require an exact card length (the default)
    #[arg(long, conflicts_with = "prefix")]
    strict: bool,

    /// Accept any card number with a known prefix
    #[arg(long)]
    prefix: bool,

    /// Reference month for expiry checks (YYYY-MM)
    #[arg(long)]
    today: Option<YearMonth>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum NetworkArg {
    Visa,
    Mastercard,
    Amex,
    Discover,
}

impl From<NetworkArg> for CardNetwork {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Visa => CardNetwork::Visa,
            NetworkArg::Mastercard => CardNetwork::Mastercard,
            NetworkArg::Amex => CardNetwork::Amex,
            NetworkArg::Discover => CardNetwork::Discover,
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Format { kind } => cmd_format(kind),
        Commands::Detect {
            card_number,
            strict,
        } => cmd_detect(&card_number, strict),
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
        Commands::Validate(args) => cmd_validate(args),
        Commands::Preview {
            number,
            expiry,
            cvv,
        } => cmd_preview(&number, &expiry, &cvv),
        Commands::Generate {
            network,
            count,
            formatted,
            deterministic,
        } => cmd_generate(network.into(), count, formatted, deterministic),
    }
}

fn cmd_format(kind: FormatKind) {
    let formatted = match kind {
        FormatKind::Number { raw } => format::format_card_number(&raw),
        FormatKind::Expiry { raw } => format::format_expiry_date(&raw),
        FormatKind::Cvv { raw, network } => {
            let network = network.map(CardNetwork::from).unwrap_or_default();
            format::format_cvv_code(&raw, network)
        }
    };
    println!("{}", formatted);
}

fn cmd_detect(card_number: &str, strict: bool) {
    let digits = format::sanitize(card_number);
    if digits.is_empty() {
        eprintln!("Error: No digits provided");
        std::process::exit(1);
    }

    let network = if strict {
        classify_strict(&digits)
    } else {
        classify(&digits)
    };

    println!("Detected Network: {}", network);
    if network.is_known() {
        println!("Valid Lengths: {:?}", network.valid_lengths());
        println!("CVV Length: {}", network.cvv_length());
    }
}

fn cmd_luhn(card_number: &str) {
    if luhn::check_luhn(card_number) {
        println!("Luhn check: PASS");
        std::process::exit(0);
    } else {
        println!("Luhn check: FAIL");
        std::process::exit(1);
    }
}

/// Applies the command-line overrides to every matching rule.
fn override_rules(
    rules: FieldRuleSet,
    strictness: Option<Strictness>,
    today: Option<YearMonth>,
) -> FieldRuleSet {
    let mut adjusted = rules.clone();
    for field in FieldId::ALL {
        let chain = rules
            .rules(field)
            .iter()
            .map(|validator| match (validator.rule(), strictness, today) {
                (Rule::CardNumber(_), Some(strictness), _) => {
                    Validator::card_number_with(validator.message(), strictness)
                }
                (Rule::ExpiryDate(_), _, Some(today)) => {
                    Validator::expiry_date_at(validator.message(), today)
                }
                _ => validator.clone(),
            })
            .collect();
        adjusted.set(field, chain);
    }
    adjusted
}

fn cmd_validate(args: ValidateArgs) {
    let field: FieldId = match args.field.parse() {
        Ok(field) => field,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let rules = match &args.rules {
        Some(path) => match FieldRuleSet::from_file(path) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        },
        None => default_rules().clone(),
    };

    let strictness = if args.prefix {
        Some(Strictness::Prefix)
    } else if args.strict {
        Some(Strictness::ExactLength)
    } else {
        None
    };
    let rules = override_rules(rules, strictness, args.today);

    let outcome = rules.validate(field, &args.value);
    match args.output {
        OutputFormat::Text => match outcome.message() {
            None => println!("{}: valid", field),
            Some(message) => println!("{}: {}", field, message),
        },
        OutputFormat::Json => {
            let json = serde_json::json!({
                "field": field.as_str(),
                "valid": outcome.is_valid(),
                "message": outcome.message(),
            });
            println!("{}", json);
        }
    }

    std::process::exit(if outcome.is_valid() { 0 } else { 1 });
}

fn cmd_preview(number: &str, expiry: &str, cvv: &str) {
    let network = classify(&format::sanitize(number));
    println!("Network: {}", network);
    println!("Number:  {}", mask::preview_card_number(number));
    println!("Expiry:  {}", mask::preview_expiry(expiry));
    println!("CVV:     {}", mask::preview_cvv(cvv, network));
}

fn cmd_generate(network: CardNetwork, count: usize, formatted: bool, deterministic: bool) {
    let numbers = if deterministic {
        generate::test_number(network).into_iter().cycle().take(count).collect()
    } else {
        generate::random_numbers(network, count)
    };

    for number in numbers {
        if formatted {
            println!("{}", format::format_card_number(&number));
        } else {
            println!("{}", number);
        }
    }
}
