//! Server-rendered HTML for the single prediction page.

use std::fmt::Write;

use super::form::{FieldControl, FormSection, LoanApplicationForm};
use super::presenter::{Banner, BannerKind};
use super::store::ModelChoice;

pub const PAGE_TITLE: &str = "Loan Approval Predictor";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; display: flex; color: #262730; }
aside { width: 260px; min-height: 100vh; background: #f0f2f6; padding: 1.5rem; box-sizing: border-box; }
main { flex: 1; padding: 2rem 3rem; }
.section { display: grid; gap: 1.5rem; }
.section.cols-2 { grid-template-columns: repeat(2, 1fr); }
.section.cols-3 { grid-template-columns: repeat(3, 1fr); }
label { display: block; margin-bottom: 1rem; font-size: 0.9rem; }
input, select { display: block; width: 100%; margin-top: 0.3rem; padding: 0.4rem; box-sizing: border-box; }
hr { margin: 1.5rem 0; border: none; border-top: 1px solid #ddd; }
.banner { padding: 1rem; border-radius: 0.5rem; margin-top: 1rem; }
.banner.success { background: #dff5e3; color: #176c2c; }
.banner.error { background: #fde4e4; color: #9b1c1c; }
.balloons { font-size: 2.5rem; animation: rise 3s ease-out forwards; }
@keyframes rise { from { transform: translateY(40px); opacity: 1; } to { transform: translateY(-200px); opacity: 0; } }
"#;

/// Everything needed to draw the page once.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub choice: ModelChoice,
    pub form: &'a LoanApplicationForm,
    pub banner: Option<&'a Banner>,
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(PAGE_TITLE));
    let _ = writeln!(html, "<style>{STYLE}</style>\n</head>\n<body>");

    render_sidebar(&mut html, view.choice);

    html.push_str("<main>\n<h1>🏦 Loan Approval Prediction System</h1>\n");
    html.push_str("<p>Enter the applicant details below to check loan eligibility.</p>\n");
    let _ = writeln!(
        html,
        "<form id=\"loan_form\" method=\"post\" action=\"/predict?model={}\">",
        view.choice.slug()
    );
    for (index, section) in view.form.sections().iter().enumerate() {
        if index > 0 {
            html.push_str("<hr>\n");
        }
        render_section(&mut html, section);
    }
    html.push_str("<button type=\"submit\">Check Loan Status</button>\n</form>\n");

    if let Some(banner) = view.banner {
        html.push_str("<hr>\n");
        render_banner(&mut html, banner);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_sidebar(html: &mut String, choice: ModelChoice) {
    html.push_str("<aside>\n<h2>Settings</h2>\n<form method=\"get\" action=\"/\">\n");
    html.push_str("<label>Choose Prediction Model\n<select name=\"model\">\n");
    for option in ModelChoice::OPTIONS {
        let selected = if option == choice { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            option.slug(),
            escape(option.label())
        );
    }
    html.push_str("</select>\n</label>\n<button type=\"submit\">Apply</button>\n</form>\n</aside>\n");
}

fn render_section(html: &mut String, section: &FormSection) {
    let _ = writeln!(html, "<h3>{}</h3>", escape(section.title));
    let _ = writeln!(html, "<div class=\"section cols-{}\">", section.columns.len());
    for column in &section.columns {
        html.push_str("<div>\n");
        for control in column {
            render_control(html, control);
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
}

fn render_control(html: &mut String, control: &FieldControl) {
    match control {
        FieldControl::Number {
            name,
            label,
            value,
            min,
            max,
            step,
            decimals,
        } => {
            let decimals = *decimals;
            let _ = write!(
                html,
                "<label>{}\n<input type=\"number\" name=\"{name}\" value=\"{value:.decimals$}\" step=\"{step}\"",
                escape(label),
            );
            if let Some(min) = min {
                let _ = write!(html, " min=\"{min}\"");
            }
            if let Some(max) = max {
                let _ = write!(html, " max=\"{max}\"");
            }
            html.push_str(" required>\n</label>\n");
        }
        FieldControl::Slider {
            name,
            label,
            value,
            min,
            max,
        } => {
            let _ = writeln!(
                html,
                "<label>{}\n<input type=\"range\" name=\"{name}\" value=\"{value}\" min=\"{min}\" max=\"{max}\" step=\"1\" oninput=\"this.nextElementSibling.value = this.value\">\n<output>{value}</output>\n</label>",
                escape(label),
            );
        }
        FieldControl::Select {
            name,
            label,
            options,
            selected,
        } => {
            let _ = writeln!(html, "<label>{}\n<select name=\"{name}\">", escape(label));
            for option in options {
                let marker = if option == selected { " selected" } else { "" };
                let option = escape(option);
                let _ = writeln!(html, "<option value=\"{option}\"{marker}>{option}</option>");
            }
            html.push_str("</select>\n</label>\n");
        }
    }
}

fn render_banner(html: &mut String, banner: &Banner) {
    if banner.celebrate {
        html.push_str("<div class=\"balloons\" aria-hidden=\"true\">🎈🎈🎈🎈🎈</div>\n");
    }
    let class = match banner.kind {
        BannerKind::Success => "success",
        BannerKind::Error => "error",
    };
    let _ = writeln!(
        html,
        "<div class=\"banner {class}\" role=\"alert\">{}</div>",
        escape(&banner.message)
    );
}

/// Minimal HTML text/attribute escaping; failure text from models is echoed verbatim.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
