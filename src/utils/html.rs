use std::fmt::Write;

use crate::services::advisory::OptimizationReport;

/// Escapes the characters that would otherwise be interpreted as markup.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn temperature_line(temperature: Option<f64>) -> String {
    match temperature {
        Some(t) => format!("{t} °C"),
        None => "weather data unavailable".to_string(),
    }
}

/// Generates the styled HTML body of the energy optimization email.
///
/// The layout uses table-based markup with inline CSS so it renders the same
/// in web and desktop mail clients. The weather tips section is only present
/// when `tips` is non-empty.
pub fn generate_energy_report_html(
    report: &OptimizationReport,
    temperature: Option<f64>,
    tips: &[&str],
) -> String {
    let current_year = time::OffsetDateTime::now_utc().year();
    let name = escape_html(&report.full_name);

    let mut tips_section = String::new();
    if !tips.is_empty() {
        tips_section.push_str(
            r#"<h2 style="margin: 24px 0 12px 0; font-size: 20px; font-weight: 600; color: #1c1e21;">Weather Tips:</h2><ul style="margin: 0; padding-left: 20px; font-size: 15px; line-height: 1.6; color: #606770;">"#,
        );
        for tip in tips {
            let _ = write!(tips_section, "<li>{}</li>", escape_html(tip));
        }
        tips_section.push_str("</ul>");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Energy Optimization Update</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; background-color: #f0f2f5;">
    <table width="100%" border="0" cellspacing="0" cellpadding="0" style="background-color: #f0f2f5;">
        <tr>
            <td align="center" style="padding: 20px;">
                <table width="600" border="0" cellspacing="0" cellpadding="0" style="max-width: 600px; width: 100%; background-color: #ffffff; border-radius: 12px;">
                    <tr>
                        <td style="padding: 40px 40px 20px 40px;">
                            <h1 style="margin: 0; color: #1c1e21; font-size: 28px; font-weight: 600;">Hello {name},</h1>
                            <p style="margin: 8px 0 0 0; color: #606770; font-size: 16px;">Your personalized energy advisory report:</p>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 0 40px 20px 40px;">
                            <ul style="margin: 0; padding-left: 20px; font-size: 15px; line-height: 1.8; color: #1c1e21;">
                                <li><b>Square area:</b> {area} m²</li>
                                <li><b>Insulation quality:</b> {insulation}</li>
                                <li><b>Year built:</b> {year_built}</li>
                                <li><b>Estimated energy usage:</b> {usage:.3} kWh</li>
                                <li><b>Estimated daily cost:</b> {cost:.3} €</li>
                                <li><b>Temperature at location:</b> {temperature}</li>
                            </ul>
                            {tips_section}
                            <p style="margin: 24px 0 0 0; font-size: 15px; color: #606770;">Thank you for using our service!</p>
                        </td>
                    </tr>
                    <tr>
                        <td align="center" style="padding: 30px 40px; border-top: 1px solid #e1e4e8;">
                            <p style="margin: 0; font-size: 12px; color: #90949c; line-height: 1.5;">
                                &copy; {current_year} Efficient Energy Advisory.<br>
                                You receive this email because you requested an energy optimization report.
                            </p>
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>"#,
        area = report.square_area,
        insulation = escape_html(&report.insulation_quality),
        year_built = report.year_built,
        usage = report.energy_usage,
        cost = report.estimated_cost,
        temperature = temperature_line(temperature),
    )
}

/// Generates the plain-text alternative of [`generate_energy_report_html`].
pub fn generate_energy_report_text(
    report: &OptimizationReport,
    temperature: Option<f64>,
    tips: &[&str],
) -> String {
    let mut text = format!(
        "Hello {name},\n\n\
         Your personalized energy advisory report:\n\
         - Square area: {area} m²\n\
         - Insulation quality: {insulation}\n\
         - Year built: {year_built}\n\
         - Estimated energy usage: {usage:.3} kWh\n\
         - Estimated daily cost: {cost:.3} €\n\
         - Temperature at location: {temperature}\n",
        name = report.full_name,
        area = report.square_area,
        insulation = report.insulation_quality,
        year_built = report.year_built,
        usage = report.energy_usage,
        cost = report.estimated_cost,
        temperature = temperature_line(temperature),
    );

    if !tips.is_empty() {
        text.push_str("\nWeather Tips:\n");
        for tip in tips {
            let _ = writeln!(text, "- {tip}");
        }
    }

    text.push_str("\nThank you for using our efficient energy advisory service!\n");
    text
}
