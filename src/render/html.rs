// src/render/html.rs
use std::fmt::Write;

use crate::rank::Ranked;
use crate::table::Record;
use crate::view::Column;
use crate::view::Fields;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `<thead>` with one label per column, `<tbody>` with one row per record.
pub fn render_table<R: Fields>(columns: &[Column], rows: &[R]) -> String {
    let mut out = String::from("<thead><tr>");
    for col in columns {
        let _ = write!(out, "<th>{}</th>", escape_html(col.label));
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for col in columns {
            let _ = write!(out, "<td>{}</td>", col.cell(row));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody>");
    out
}

/// Top-of-standings block for the home view.
pub fn render_podium(top: &[Ranked<Record>]) -> String {
    if top.is_empty() {
        return r#"<div class="podium__empty">No standings data yet.</div>"#.to_string();
    }

    let mut out = String::new();
    for r in top {
        let team = match r.item.value("Team (registered)") {
            "" => r.item.value("Team"),
            t => t,
        };
        let pts = match r.item.value("Total") {
            "" => "0",
            t => t,
        };
        let _ = write!(
            out,
            r#"<div class="podiumRow"><div class="podiumLeft"><div class="podiumRank">{}</div><div><div class="podiumName">{}</div><div class="podiumMeta">{}</div></div></div><div class="podiumPts">{} pts</div></div>"#,
            r.position,
            escape_html(r.item.value("Driver Name")),
            escape_html(team),
            escape_html(pts),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::rank_by_total;
    use crate::table::records_from_text;
    use crate::view::{CONSTRUCTOR_COLUMNS, DRIVER_COLUMNS};

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom's & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom&#039;s &amp; co&lt;/a&gt;"
        );
    }

    #[test]
    fn table_has_header_row_and_one_row_per_record() {
        let recs = records_from_text("Team,Total\nFerrari,40\nMcLaren,30\n");
        let ranked = rank_by_total(&recs, "Total");
        let html = render_table(CONSTRUCTOR_COLUMNS, &ranked);

        assert!(html.starts_with("<thead><tr><th>Pos</th><th>Constructor</th><th>Points</th></tr></thead>"));
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains(
            r#"<tr><td>1</td><td>Ferrari</td><td><span class="badge badge--red">40</span></td></tr>"#
        ));
    }

    #[test]
    fn empty_rows_still_render_header() {
        let none: Vec<Ranked<Record>> = Vec::new();
        let html = render_table(DRIVER_COLUMNS, &none);
        assert!(html.contains("<th>Driver</th>"));
        assert!(html.ends_with("<tbody></tbody>"));
    }

    #[test]
    fn podium_lists_top_three_in_rank_order() {
        let recs = records_from_text(
            "Driver Name,Team (registered),Total\nAlice,Red Bull,25\nBruno,Ferrari,40\nChen,McLaren,10\n",
        );
        let ranked = rank_by_total(&recs, "Total");
        let html = render_podium(&ranked[..3]);

        let bruno = html.find("Bruno").unwrap();
        let alice = html.find("Alice").unwrap();
        let chen = html.find("Chen").unwrap();
        assert!(bruno < alice && alice < chen);
        assert!(html.contains(r#"<div class="podiumRank">1</div><div><div class="podiumName">Bruno</div>"#));
        assert!(html.contains(r#"<div class="podiumRank">3</div><div><div class="podiumName">Chen</div>"#));
        assert!(html.contains("40 pts"));
    }

    #[test]
    fn podium_falls_back_to_team_and_zero_points() {
        let recs = records_from_text("Driver Name,Team,Total\nDee,Alpine,\n");
        let ranked = rank_by_total(&recs, "Total");
        let html = render_podium(&ranked);
        assert!(html.contains(r#"<div class="podiumMeta">Alpine</div>"#));
        assert!(html.contains("0 pts"));
    }

    #[test]
    fn empty_podium_has_placeholder() {
        assert!(render_podium(&[]).contains("No standings data yet."));
    }
}
