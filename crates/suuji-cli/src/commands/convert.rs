//! Convert command - read one numeral as an integer.

use clap::Args;
use tracing::debug;

use suuji_core::numeral::{full_width_to_half_width, half_width_to_full_width};
use suuji_core::{convert, ConversionStyle};

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Numeral to convert (e.g. 二千十九, 弐〇〇〇, 200万)
    #[arg(required = true)]
    numeral: String,

    /// Conversion strategy
    #[arg(short, long, value_enum, default_value = "dirty")]
    style: Style,

    /// Print the input with digits and Latin letters narrowed instead of converting
    #[arg(long, conflicts_with = "full_width")]
    half_width: bool,

    /// Print the input with digits and Latin letters widened instead of converting
    #[arg(long)]
    full_width: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Style {
    /// Strip surrounding noise and separators first
    Dirty,
    /// Numeral-only input, any notation
    Clean,
    /// Positional-value numerals (二百万)
    Traditional,
    /// Digit-by-digit numerals (二〇一九)
    Western,
    /// Values below ten thousand
    BelowTenThousand,
}

impl From<Style> for ConversionStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Dirty => ConversionStyle::Dirty,
            Style::Clean => ConversionStyle::Clean,
            Style::Traditional => ConversionStyle::Traditional,
            Style::Western => ConversionStyle::Western,
            Style::BelowTenThousand => ConversionStyle::BelowTenThousand,
        }
    }
}

pub fn run(args: ConvertArgs) -> anyhow::Result<()> {
    if args.half_width {
        println!("{}", full_width_to_half_width(&args.numeral));
        return Ok(());
    }
    if args.full_width {
        println!("{}", half_width_to_full_width(&args.numeral));
        return Ok(());
    }

    debug!("Converting {:?} with {:?} style", args.numeral, args.style);

    let value = convert(&args.numeral, args.style.into())
        .map_err(|e| anyhow::anyhow!("Cannot convert {:?}: {}", args.numeral, e))?;

    println!("{}", value);

    Ok(())
}
