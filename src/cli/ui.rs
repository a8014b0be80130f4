use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Confirm, Input, Select };
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use flipper::models::analysis::{ Analysis, InvestmentRating };
use flipper::models::common::ModelVariant;
use flipper::models::property::{ Condition, Property, PropertyInput };

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn term_width() -> usize {
    (Term::stdout().size().1 as usize).clamp(40, 120)
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text with proper wrapping
pub fn print_text(text: &str) {
    let width = term_width();
    for line in text.lines() {
        if line.starts_with('-') || line.starts_with('*') {
            println!("{}", line);
        } else {
            for wrapped_line in wrap(line, width.saturating_sub(4)) {
                println!("{}", wrapped_line);
            }
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Red banner for a failed request
pub fn print_error_banner(title: &str, message: &str) {
    eprintln!();
    eprintln!("{}", format!(" {} ", title).bold().white().on_red());
    for line in wrap(message, term_width().saturating_sub(4)) {
        eprintln!("  {}", line.red());
    }
    eprintln!();
}

/// Whole dollars with thousands separators, e.g. `-$40,000`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

fn color_rating(rating: &InvestmentRating) -> ColoredString {
    let label = format!("{} {}", rating.emoji(), rating);
    match rating {
        InvestmentRating::Excellent => label.green().bold(),
        InvestmentRating::Good => label.bright_green().bold(),
        InvestmentRating::Moderate => label.yellow().bold(),
        InvestmentRating::Poor => label.red().bold(),
        InvestmentRating::Unknown(_) => label.dimmed(),
    }
}

/// Numbered property list, the entry being analysed marked with `>`
pub fn display_properties(properties: &[Property], highlighted: Option<&Property>) {
    print_header(&format!("Properties ({})", properties.len()));
    if properties.is_empty() {
        println!("{}", "Add a property to get started".dimmed());
        return;
    }
    for (i, property) in properties.iter().enumerate() {
        let marker = if highlighted.map_or(false, |h| h.id == property.id) { ">" } else { " " };
        println!(
            "{} {:>2}. {}  {}  {}",
            marker,
            i + 1,
            property.address.bold(),
            format_currency(property.purchase_price as f64).cyan(),
            property.id.to_string().dimmed()
        );
    }
}

/// Render the results panel: property header, six metrics, four narratives
pub fn display_analysis(analysis: &Analysis) {
    let property = &analysis.property;
    let money = &analysis.financials;

    print_header(&property.address);
    println!(
        "{} {}   {} {} sq ft   {} {}   {} {}   {} {}",
        "Purchase:".bold(),
        format_currency(property.purchase_price as f64),
        "Size:".bold(),
        property.square_feet,
        "Beds:".bold(),
        property.bedrooms,
        "Baths:".bold(),
        property.bathrooms,
        "Condition:".bold(),
        property.condition
    );

    print_header("Investment Summary");
    let net_profit = format_currency(money.net_profit);
    let net_profit = if money.net_profit > 0.0 { net_profit.green() } else { net_profit.red() };
    print_result("Predicted Resale", &format_currency(money.resale_value));
    print_result("Renovation Costs", &format_currency(money.renovation_costs).yellow().to_string());
    print_result("Net Profit", &net_profit.bold().to_string());
    let roi = match money.roi.percent() {
        Some(_) => format!("{}%", money.roi),
        None => money.roi.to_string(),
    };
    print_result("ROI", &roi.blue().to_string());
    print_result("Holding Costs", &format_currency(money.holding_costs));
    print_result("Rating", &color_rating(&analysis.investment_rating).to_string());

    for (title, text) in [
        ("Renovation Breakdown", &analysis.renovation_breakdown),
        ("Market Analysis", &analysis.market_analysis),
        ("Risk Factors", &analysis.risk_factors),
        ("Recommendation Summary", &analysis.recommendation_summary),
    ] {
        print_header(title);
        if text.trim().is_empty() {
            println!("{}", "No details provided".dimmed());
        } else {
            print_text(text);
        }
    }

    println!(
        "\n{}",
        format!(
            "Analysed with {} at {}",
            analysis.model.display_name(),
            analysis.generated_at.format("%Y-%m-%d %H:%M UTC")
        ).dimmed()
    );
}

/// Interactive selection of a model variant
pub fn select_model(current: &ModelVariant) -> std::io::Result<ModelVariant> {
    let names: Vec<&str> = ModelVariant::ALL.iter()
        .map(|m| m.display_name())
        .collect();
    let default = ModelVariant::ALL.iter()
        .position(|m| m == current)
        .unwrap_or(0);

    let selection = Select::with_theme(&get_theme())
        .with_prompt("Select Gemini model")
        .items(&names)
        .default(default)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(ModelVariant::ALL[selection].clone())
}

/// Interactive selection of one property, `None` when the list is empty
pub fn select_property(properties: &[Property], prompt: &str) -> std::io::Result<Option<usize>> {
    if properties.is_empty() {
        return Ok(None);
    }
    let items: Vec<String> = properties
        .iter()
        .map(|p| format!("{} ({})", p.address, format_currency(p.purchase_price as f64)))
        .collect();

    let selection = Select::with_theme(&get_theme())
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(Some(selection))
}

fn ask(prompt: &str, allow_empty: bool) -> std::io::Result<String> {
    Input::with_theme(&get_theme())
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Collect the add-property form field by field
pub fn prompt_property_input() -> std::io::Result<PropertyInput> {
    let address = ask("Address", true)?;
    let purchase_price = ask("Purchase Price ($)", true)?;
    let square_feet = ask("Square Feet", true)?;
    let bedrooms = ask("Bedrooms (default 3)", true)?;
    let bathrooms = ask("Bathrooms (default 2)", true)?;

    let conditions: Vec<String> = Condition::ALL.iter()
        .map(|c| c.to_string())
        .collect();
    let condition = Select::with_theme(&get_theme())
        .with_prompt("Condition")
        .items(&conditions)
        .default(1)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let market_description = ask("Market Description (optional)", true)?;

    Ok(PropertyInput {
        address,
        purchase_price,
        square_feet,
        bedrooms,
        bathrooms,
        condition: conditions[condition].clone(),
        market_description,
    })
}

/// Confirm an action with the user
pub fn confirm_action(prompt: &str) -> std::io::Result<bool> {
    Confirm::with_theme(&get_theme())
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Display a spinner while waiting for an operation to complete
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_thousands_separators() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(85_000.0), "$85,000");
        assert_eq!(format_currency(1_234_567.4), "$1,234,567");
        assert_eq!(format_currency(-40_000.0), "-$40,000");
    }
}
