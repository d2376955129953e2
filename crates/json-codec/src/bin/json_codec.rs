//! `json-codec` — encode and decode `User` records from the command line.
//!
//! Usage:
//!   json-codec encode --name zhangsan --age 18 [--repeat 2] [--pretty]
//!   json-codec decode --as <one|sequence|nested|map> [--pretty] < users.json
//!   json-codec describe --as <one|sequence|nested|map>
//!
//! Log verbosity follows `RUST_LOG` (default `warn`); logs go to stderr.

use std::collections::BTreeMap;
use std::io::{self, Read};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use json_codec::{Codec, CodecOptions, Field, JsonType, Record, TypeDescriptor};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default, PartialEq)]
struct User {
    user_name: String,
    age: u32,
}

impl Record for User {
    const NAME: &'static str = "User";

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new(
                "userName",
                |u: &User| &u.user_name,
                |u: &mut User| &mut u.user_name,
            ),
            Field::new("age", |u: &User| &u.age, |u: &mut User| &mut u.age),
        ]
    }
}

#[derive(Debug, Parser)]
#[command(name = "json-codec", version, about = "Encode and decode User records as JSON")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a user (or a sequence of copies) as JSON.
    Encode {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        /// Emit a sequence of this many copies instead of a single object;
        /// `--repeat 0` emits an empty sequence.
        #[arg(long, default_value_t = 1)]
        repeat: usize,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Read JSON from stdin, decode it and print the records and re-encoded text.
    Decode {
        #[arg(long = "as", value_enum, default_value_t = Target::One)]
        target: Target,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the shape a target decodes into.
    Describe {
        #[arg(long = "as", value_enum, default_value_t = Target::One)]
        target: Target,
    },
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Indent the emitted JSON.
    #[arg(long)]
    pretty: bool,
    /// Maximum nesting depth accepted or produced.
    #[arg(long, default_value_t = json_codec::options::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl OutputArgs {
    fn codec(&self) -> Codec {
        Codec::with_options(
            CodecOptions::new()
                .pretty(self.pretty)
                .max_depth(self.max_depth),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    /// A single `User` object.
    One,
    /// An array of `User` objects.
    Sequence,
    /// An array of arrays of `User` objects.
    Nested,
    /// An object mapping names to `User` objects.
    Map,
}

impl Target {
    fn descriptor(self) -> TypeDescriptor {
        match self {
            Self::One => TypeDescriptor::simple::<User>(),
            Self::Sequence => TypeDescriptor::sequence_of::<User>(),
            Self::Nested => TypeDescriptor::composite::<Vec<Vec<User>>>(),
            Self::Map => TypeDescriptor::composite::<BTreeMap<String, User>>(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Encode {
            name,
            age,
            repeat,
            output,
        } => {
            let codec = output.codec();
            let user = User {
                user_name: name,
                age,
            };
            let text = if repeat != 1 {
                codec.encode(&vec![user; repeat])?
            } else {
                codec.encode(&user)?
            };
            info!(repeat, "encoded users");
            println!("{text}");
        }
        Command::Decode { target, output } => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read JSON from stdin")?;
            let codec = output.codec();
            debug!(shape = %target.descriptor(), "decoding stdin");
            match target {
                Target::One => {
                    let user: User = codec.decode_one(&input)?;
                    report(&codec, [&user], &user)?;
                }
                Target::Sequence => {
                    let users: Vec<User> = codec.decode_sequence(&input)?;
                    report(&codec, &users, &users)?;
                }
                Target::Nested => {
                    let groups: Vec<Vec<User>> = codec.decode_shape(&input)?;
                    report(&codec, groups.iter().flatten(), &groups)?;
                }
                Target::Map => {
                    let by_name: BTreeMap<String, User> = codec.decode_shape(&input)?;
                    report(&codec, by_name.values(), &by_name)?;
                }
            }
        }
        Command::Describe { target } => {
            println!("{}", target.descriptor());
        }
    }
    Ok(())
}

/// Prints every decoded user, then the decoded value re-encoded in its own shape.
fn report<'a, T: JsonType>(
    codec: &Codec,
    users: impl IntoIterator<Item = &'a User>,
    decoded: &T,
) -> anyhow::Result<()> {
    let mut count = 0;
    for user in users {
        println!("{user:?}");
        count += 1;
    }
    info!(count, "decoded records");
    println!("json = {}", codec.encode(decoded)?);
    Ok(())
}
