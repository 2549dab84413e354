//! Server-side HTML for the landing pages.
//!
//! Pages are assembled with `format!`; every value that came from the sheet
//! or the visitor goes through [`escape_html`] first. Data handed to the
//! inline script travels as a JSON island so it never needs JS escaping.

use crate::core::signage::{storage_key, SignageSelection, SIGNAGE_ITEMS};
use crate::core::Business;
use crate::domain::model::DEFAULT_CASE_STUDY_IMAGE;
use chrono::{Datelike, Utc};
use serde_json::json;
use std::fmt::Write;

const PLACEHOLDER: &str = "—";

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON safe to inline inside a `<script>` element.
fn json_island(value: &serde_json::Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

fn stat(value: &str) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        escape_html(value)
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ margin: 0; font-family: system-ui, sans-serif; color: #0f172a; background: #fff; }}
.section {{ max-width: 80rem; margin: 0 auto; padding: 3rem 1.5rem; }}
.centered {{ min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; text-align: center; }}
.primary {{ color: #164087; }}
.pill {{ display: inline-block; border-radius: 999px; background: #fde8ec; padding: .25rem .75rem; font-size: .75rem; color: #164087; }}
.grid {{ display: grid; gap: 1.5rem; grid-template-columns: repeat(auto-fit, minmax(12rem, 1fr)); }}
.card {{ border: 1px solid #e2e8f0; border-radius: 1rem; padding: 1.25rem; }}
.card.expected {{ background: #164087; color: #fff; }}
.stat {{ font-size: 1.875rem; font-weight: 700; }}
.button {{ display: inline-block; background: #164087; color: #fff; border: 0; border-radius: .5rem; padding: .75rem 1.25rem; text-decoration: none; cursor: pointer; }}
.sign {{ position: relative; border: 1px solid #e2e8f0; border-radius: 1rem; overflow: hidden; padding: 0; background: #fff; cursor: pointer; }}
.sign[aria-pressed="true"] {{ outline: 3px solid #164087; }}
.sign img {{ width: 100%; aspect-ratio: 1; object-fit: cover; display: block; }}
.sign span {{ position: absolute; left: .5rem; bottom: .5rem; background: rgba(255,255,255,.9); padding: .25rem .5rem; border-radius: .25rem; font-size: .75rem; font-weight: 600; }}
form label {{ display: block; font-size: .875rem; }}
form input, form textarea {{ width: 100%; padding: .5rem; border: 1px solid #cbd5e1; border-radius: .5rem; box-sizing: border-box; }}
.success {{ border: 1px solid #bbf7d0; background: #f0fdf4; color: #166534; padding: 1rem; border-radius: .5rem; }}
</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    )
}

pub fn render_home() -> String {
    layout(
        "Stasher Flagship Locations",
        r#"<main class="centered">
<h1 class="primary">Stasher Flagship Locations</h1>
<p>Personalized landing pages for our flagship Stashpoint partners.</p>
<a class="button" href="/flagship/le-grand-hotel">View Example Page</a>
</main>"#,
    )
}

pub fn render_not_found() -> String {
    layout(
        "Location Not Found",
        r#"<main class="centered">
<h1 class="primary">Location Not Found</h1>
<p>We couldn't find the flagship location you're looking for.</p>
<a class="button" href="/">Return Home</a>
</main>"#,
    )
}

pub fn render_error() -> String {
    layout(
        "Something went wrong",
        r#"<main class="centered">
<h1 class="primary">Something went wrong</h1>
<p>This page could not be loaded right now. Please try again in a few minutes.</p>
<a class="button" href="/">Return Home</a>
</main>"#,
    )
}

fn stat_cards(out: &mut String, class: &str, cards: [(&str, &str); 4]) {
    out.push_str("<div class=\"grid\">\n");
    for (value, label) in cards {
        let _ = writeln!(
            out,
            "<div class=\"card {class}\"><div class=\"stat\">{}</div><div>{}</div></div>",
            stat(value),
            label,
        );
    }
    out.push_str("</div>\n");
}

fn signage_picker(out: &mut String, selection: &SignageSelection) {
    out.push_str("<div class=\"grid\" id=\"signage-picker\">\n");
    for item in SIGNAGE_ITEMS {
        let _ = writeln!(
            out,
            "<button type=\"button\" class=\"sign\" data-sign-id=\"{id}\" aria-pressed=\"{pressed}\">\
<img src=\"{src}\" alt=\"{alt}\" draggable=\"false\"><span>{name}</span></button>",
            id = escape_html(item.id),
            pressed = selection.is_selected(item.id),
            src = escape_html(item.src),
            alt = escape_html(item.alt),
            name = escape_html(item.name),
        );
    }
    out.push_str("</div>\n");
}

fn selection_summary(selection: &SignageSelection) -> String {
    match selection.len() {
        0 => "Select the signage items you're interested in".to_string(),
        1 => "✓ 1 item selected".to_string(),
        n => format!("✓ {} items selected", n),
    }
}

pub fn render_landing(business: &Business, selection: &SignageSelection) -> String {
    let name = escape_html(&business.business_name);
    let city = escape_html(&business.city);
    let mut body = String::new();

    let _ = write!(
        body,
        r##"<header class="section" style="display:flex;justify-content:space-between;align-items:center">
<strong>Stasher Flagship Programme</strong> <span class="pill">Invitation</span>
<nav><a href="#performance">Benefits</a> · <a href="#branding">Branding</a> · <a href="#case">Results</a> · <a href="#apply">Register Interest</a></nav>
<a class="button" href="#apply">I'm Interested</a>
</header>
<section class="section" style="background:url('{hero}') center/cover">
<span class="pill">{name} • {city}</span>
<h1>Get <span class="primary">hundreds</span> of new Stasher bookings every month.</h1>
<h2>Become a <span class="primary">Flagship Stashpoint</span> in {city}</h2>
<p>Join Stasher's premier partner programme and make {name} the go‑to spot for luggage storage in {city}.</p>
</section>
<section class="section" id="performance">
<h3>{name}'s Current Monthly Performance</h3>
"##,
        hero = escape_html(&business.hero_image_url),
    );

    let current = &business.current;
    stat_cards(
        &mut body,
        "",
        [
            (current.website_impressions.as_str(), "Website impressions"),
            (current.gmaps_impressions.as_str(), "Google Maps impressions"),
            (current.bookings.as_str(), "Bookings"),
            (current.revenue.as_str(), "Revenue"),
        ],
    );
    body.push_str("<h3 class=\"primary\">Expected Performance as a Flagship Stashpoint</h3>\n");
    let expected = &business.expected;
    stat_cards(
        &mut body,
        "expected",
        [
            (expected.website_impressions.as_str(), "Expected website impressions"),
            (expected.gmaps_impressions.as_str(), "Expected Google Maps impressions"),
            (expected.bookings.as_str(), "Expected Bookings"),
            (expected.revenue.as_str(), "Expected Revenue"),
        ],
    );

    let pitch_image = if business.paris_two.is_empty() {
        DEFAULT_CASE_STUDY_IMAGE
    } else {
        business.paris_two.as_str()
    };
    let _ = write!(
        body,
        r##"<h2>How do we achieve this lift?</h2>
<div class="grid">
<div class="card"><strong>Google Ads Boost paid for by Stasher</strong><p>We'll pay for Google Ads campaigns targeting {city} travellers and direct them to your listing.</p></div>
<div class="card"><strong>Branded Store Kit provided by Stasher</strong><p>Exterior and interior signage of your choice, co-branded with {name} to boost trust and walk‑ins.</p></div>
<div class="card"><strong>Increased Website Traffic</strong><p>We'll improve the visibility of your listing on our website and blog to increase traffic and bookings.</p></div>
<div class="card"><strong>Become Stasher's {city} Centrepiece</strong><p>Stasher's out of home advertising campaigns in {city} will be strategically centred around {name} to attract more customers to your location.</p></div>
</div>
<p><a class="button" href="#apply">Register your interest →</a> <a href="{maps}">See your area potential</a></p>
<div class="card">
<h3 class="primary">Why {name}?</h3>
<p>Your location near {landmark} makes you the ideal flagship candidate to serve travellers arriving in {city}. We'll drive demand directly to your door via paid search and priority placement.</p>
<ul>
<li>Increase your monthly revenue by hundreds of {currency}</li>
<li>Rank as one of our top Stashpoints in {city}</li>
<li>Benefit from our out of home and paid advertising campaigns in {city}</li>
</ul>
<img src="{pitch_image}" alt="{name}" style="max-width:20rem;border-radius:.75rem">
</div>
</section>
<section class="section" id="branding">
<h2>What kind of signage can a Flagship Stashpoint get?</h2>
<p>Choose the signage you'd like for {name}. Select all that apply - we can tailor them to your storefront.</p>
"##,
        maps = escape_html(&business.google_maps_url),
        landmark = escape_html(&business.landmark),
        currency = escape_html(&business.currency),
        pitch_image = escape_html(pitch_image),
    );

    signage_picker(&mut body, selection);

    let case_image = if business.paris_one.is_empty() {
        DEFAULT_CASE_STUDY_IMAGE
    } else {
        business.paris_one.as_str()
    };
    let _ = write!(
        body,
        r##"<p id="signage-summary">{summary}</p>
</section>
<section class="section" id="case">
<img src="{case_image}" alt="Case study" style="width:100%;max-height:20rem;object-fit:cover;border-radius:1rem">
<h2>How is the top Stashpoint in {city} performing?</h2>
<p>In {city}, Stasher's current top location has had:</p>
<div class="grid">
<div class="card"><div class="stat">{top_views}</div><div>Views this year</div></div>
<div class="card"><div class="stat">{top_bookings}</div><div>Bookings this year</div></div>
<div class="card"><div class="stat">{top_revenue}</div><div>Revenue this year</div></div>
</div>
<p>Featured in city campaigns: Google Ads, blog posts, OOH billboards.</p>
</section>
<section class="section" id="apply">
<h2>Register your interest</h2>
<p>Tell us a few details and our partnerships team will be in touch within one business day.</p>
<form id="interest-form" method="POST">
<label>Your name <input name="name" required placeholder="Jane Doe"></label>
<label>Role <input name="role" placeholder="Owner / Manager"></label>
<label>Business name <input name="business" value="{name}" required></label>
<label>City <input name="city" value="{city}" required></label>
<label>Email <input type="email" name="email" required placeholder="you@example.com" value="{owner_email}"></label>
<label>Phone <input type="tel" name="phone" placeholder="+33 1 23 45 67 89" value="{owner_phone}"></label>
<label>Any questions that you might have? <textarea name="notes"></textarea></label>
<input type="hidden" name="selectedSigns" value="{selected_json}">
<div class="success" id="submit-success" hidden>✓ Thank you! Your interest has been submitted. We'll be in touch within one business day.</div>
<button type="submit" class="button">Submit interest</button>
<small>By submitting, you agree to be contacted about the Flagship Programme.</small>
</form>
<div class="card">
<strong>What you'll get</strong>
<ul>
<li>Priority listing &amp; city page feature</li>
<li>Inclusion in Google Ads &amp; blog content</li>
<li>Co‑branded signage kit (signs, floor mats, opening time stickers, flags)</li>
<li>Improved visibility on our website</li>
<li>The centrepiece of our home advertising campaigns in {city}</li>
<li>Increased Google Maps reviews and visibility</li>
<li>Dedicated partner success support</li>
<li>Measurement &amp; monthly insights</li>
</ul>
<p>{contact_phone}<br>{contact_email}</p>
</div>
</section>
<footer class="section">© {year} Stasher • Flagship Programme</footer>
"##,
        summary = selection_summary(selection),
        case_image = escape_html(case_image),
        top_views = stat(&business.top_views),
        top_bookings = stat(&business.top_bookings),
        top_revenue = stat(&business.top_revenue),
        owner_email = escape_html(&business.owner_email),
        owner_phone = escape_html(&business.owner_phone),
        selected_json = escape_html(&selection.to_json()),
        contact_phone = escape_html(&business.contact_phone),
        contact_email = escape_html(&business.contact_email),
        year = Utc::now().year(),
    );

    let page_data = json!({
        "slug": business.slug,
        "businessName": business.business_name,
        "city": business.city,
        "contactEmail": business.contact_email,
        "formAction": business.form_action,
        "storageKey": storage_key(&business.business_name),
        "selected": selection.ids(),
    });
    let _ = write!(
        body,
        "<script type=\"application/json\" id=\"flagship-data\">{}</script>\n<script>{}</script>",
        json_island(&page_data),
        PAGE_SCRIPT,
    );

    layout(
        &format!("{} • Flagship Stashpoint", business.business_name),
        &body,
    )
}

/// Picker persistence (localStorage plus `/api/selection`) and form
/// submission. Storage failures are ignored.
const PAGE_SCRIPT: &str = r#"
(function () {
  var data = JSON.parse(document.getElementById('flagship-data').textContent);
  var selected = data.selected.slice();
  try {
    var raw = localStorage.getItem(data.storageKey);
    if (raw) selected = JSON.parse(raw);
  } catch (e) {}

  var form = document.getElementById('interest-form');
  var hidden = form.querySelector('input[name="selectedSigns"]');
  var summary = document.getElementById('signage-summary');
  var buttons = document.querySelectorAll('[data-sign-id]');

  function sync() {
    buttons.forEach(function (b) {
      b.setAttribute('aria-pressed', selected.indexOf(b.dataset.signId) >= 0 ? 'true' : 'false');
    });
    hidden.value = JSON.stringify(selected);
    var n = selected.length;
    summary.textContent = n > 0
      ? '✓ ' + n + ' item' + (n !== 1 ? 's' : '') + ' selected'
      : "Select the signage items you're interested in";
    try { localStorage.setItem(data.storageKey, JSON.stringify(selected)); } catch (e) {}
  }

  function remember() {
    fetch('/api/selection/' + encodeURIComponent(data.slug), {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ selected: selected })
    }).catch(function () {});
  }

  buttons.forEach(function (b) {
    b.addEventListener('click', function () {
      var id = b.dataset.signId;
      var at = selected.indexOf(id);
      if (at >= 0) selected.splice(at, 1); else selected.push(id);
      sync();
      remember();
    });
  });
  sync();

  form.addEventListener('submit', function (e) {
    e.preventDefault();
    var fields = {};
    new FormData(form).forEach(function (v, k) { fields[k] = v; });

    if (!data.formAction) {
      var subject = encodeURIComponent('Flagship interest — ' + data.businessName + ' (' + data.city + ')');
      var body = encodeURIComponent(Object.keys(fields).map(function (k) { return k + ': ' + fields[k]; }).join('\n'));
      window.location.href = 'mailto:' + data.contactEmail + '?subject=' + subject + '&body=' + body;
      return;
    }

    var button = form.querySelector('button[type="submit"]');
    button.disabled = true;
    button.textContent = 'Submitting...';
    fields.formAction = data.formAction;
    fetch('/api/submit', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(fields)
    }).then(function (res) {
      if (!res.ok) throw new Error('Submission failed');
      var banner = document.getElementById('submit-success');
      banner.hidden = false;
      try { window.alert('Thank you for registering your interest in becoming a Flagship Stashpoint in ' + data.city + '!'); } catch (e) {}
      try { form.reset(); } catch (e) {}
      setTimeout(function () { banner.hidden = true; }, 3000);
    }).catch(function () {
      alert('There was an error submitting the form. Please try again or contact us directly.');
    }).finally(function () {
      button.disabled = false;
      button.textContent = 'Submit interest';
    });
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Row;

    fn business(pairs: &[(&str, &str)]) -> Business {
        let row: Row = pairs.iter().copied().collect();
        Business::from(&row)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_landing_escapes_sheet_values() {
        let page = render_landing(
            &business(&[("businessName", "<script>alert(1)</script>"), ("city", "Paris")]),
            &SignageSelection::default(),
        );

        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_landing_shows_placeholder_for_missing_stats() {
        let page = render_landing(
            &business(&[("businessName", "Le Grand Hotel"), ("bookings", "42")]),
            &SignageSelection::default(),
        );

        assert!(page.contains("<div class=\"stat\">42</div>"));
        assert!(page.contains("<div class=\"stat\">—</div>"));
        assert!(page.contains("Why Le Grand Hotel?"));
    }

    #[test]
    fn test_landing_embeds_storage_key_and_selection() {
        let selection = SignageSelection::new(vec!["flag".to_string()]);
        let page = render_landing(
            &business(&[("slug", "le-grand-hotel"), ("businessName", "Le Grand Hotel")]),
            &selection,
        );

        assert!(page.contains("flagship-signs-le-grand-hotel"));
        assert!(page.contains("\"slug\":\"le-grand-hotel\""));
        assert!(page.contains("data-sign-id=\"flag\" aria-pressed=\"true\""));
        assert!(page.contains("data-sign-id=\"floor-mat\" aria-pressed=\"false\""));
        assert!(page.contains("✓ 1 item selected"));
    }

    #[test]
    fn test_json_island_cannot_close_the_script_tag() {
        let island = json_island(&json!({ "businessName": "</script><b>" }));
        assert!(!island.contains("</script>"));
    }

    #[test]
    fn test_static_pages() {
        assert!(render_home().contains("/flagship/le-grand-hotel"));
        assert!(render_not_found().contains("Location Not Found"));
        assert!(render_error().contains("Something went wrong"));
    }
}
