use optweave::{SettleReport, Variant, VariationOption};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
    pub const RED: &str = "\x1b[31m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(
    product: &str,
    options: &[VariationOption],
    variants: &[Variant],
    report: &SettleReport,
    color: bool,
) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Variants for \"{product}\""), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Options ━━━", ansi::GRAY));
    print_options(options, &palette);

    println!("\n{}", palette.paint("━━━ Variants ━━━", ansi::GRAY));
    if variants.is_empty() {
        println!("{}", palette.dim("  No variants generated"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • Every option needs at least one value");
        println!("  • The variation feature may be disabled");
        println!("\n{}", palette.dim("  Tip: set RUST_LOG=optweave=debug to see reducer decisions"));
    } else {
        print_variants(variants, &palette);
    }

    println!("\n{}", palette.paint("━━━ Reconcile ━━━", ansi::GRAY));
    print_report(report, &palette);
    println!();
}

fn print_options(options: &[VariationOption], palette: &ansi::Palette) {
    if options.is_empty() {
        println!("{}", palette.dim("  (none)"));
        return;
    }
    for (idx, option) in options.iter().enumerate() {
        let name = if option.name.is_empty() { "(unnamed)" } else { option.name.as_str() };
        let values = option.values.iter().map(|v| v.value.as_str()).collect::<Vec<_>>().join(", ");
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{idx}]"), ansi::GRAY),
            palette.paint(name, ansi::BLUE),
            palette.dim("│"),
            if values.is_empty() { palette.dim("(no values)") } else { palette.paint(values, ansi::GREEN) },
        );
    }
}

fn print_variants(variants: &[Variant], palette: &ansi::Palette) {
    for (idx, variant) in variants.iter().enumerate() {
        let active = if variant.is_active {
            palette.paint("active", ansi::GREEN)
        } else {
            palette.paint("inactive", ansi::RED)
        };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{idx}]"), ansi::GRAY),
            palette.bold(palette.paint(&variant.sku, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(&variant.title, ansi::YELLOW),
        );
        println!(
            "      {} {:.2}  {} {}  {} {}",
            palette.dim("price:"),
            variant.price,
            palette.dim("stock:"),
            variant.stock,
            palette.dim("│"),
            active,
        );
    }
}

fn print_report(report: &SettleReport, palette: &ansi::Palette) {
    let (created, dropped) = report.churn();
    println!(
        "  Commands: {}  │  Recomputes: {}  │  Skipped: {}  │  Created: {}  │  Dropped: {}",
        palette.paint(report.processed.to_string(), ansi::BLUE),
        palette.paint(report.recomputed.to_string(), ansi::GREEN),
        palette.dim(report.skipped_unchanged.to_string()),
        palette.paint(created.to_string(), ansi::GREEN),
        palette.paint(dropped.to_string(), ansi::YELLOW),
    );
    for metrics in &report.recomputes {
        println!(
            "  {} {}  {} {}  {} {}",
            palette.dim("combinations:"),
            palette.paint(metrics.combinations.to_string(), ansi::BLUE),
            palette.dim("generate:"),
            palette.paint(format!("{:?}", metrics.generate), ansi::CYAN),
            palette.dim("reconcile:"),
            palette.paint(format!("{:?}", metrics.reconcile), ansi::CYAN),
        );
    }
    if !report.errors.is_empty() {
        for err in &report.errors {
            println!("  {} {}", palette.paint("edit error:", ansi::RED), err);
        }
    }
}
