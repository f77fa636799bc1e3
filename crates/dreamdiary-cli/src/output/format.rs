use dreamdiary_core::model::{DreamEntry, Role};
use dreamdiary_query::{CloudTier, DreamStats, TagCloud, TagCount};

use super::OutputFormat;

const EXCERPT_CHARS: usize = 60;

pub fn format_dream_list(dreams: &[&DreamEntry], fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(dreams).unwrap_or_default() + "\n",
        OutputFormat::Text => format_dream_list_text(dreams),
    }
}

fn format_dream_list_text(dreams: &[&DreamEntry]) -> String {
    if dreams.is_empty() {
        return "No dreams recorded yet.\n".to_string();
    }

    let mut out = String::new();
    for d in dreams {
        let lucid = if d.is_lucid { " [lucid]" } else { "" };
        let heading = match d.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title.to_string(),
            _ => excerpt(&d.content),
        };
        out.push_str(&format!(
            "\u{25c6} {} {} {}{lucid}  {heading}",
            d.id.short(),
            d.date.format("%Y-%m-%d"),
            d.mood,
        ));
        if !d.tags.is_empty() {
            out.push_str(&format!("  {}", hashtags(&d.tags)));
        }
        out.push('\n');
    }
    out
}

pub fn format_dream_full(entry: &DreamEntry, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(entry).unwrap_or_default(),
        OutputFormat::Text => format_dream_full_text(entry),
    }
}

fn format_dream_full_text(d: &DreamEntry) -> String {
    let mut out = String::new();

    out.push_str(&format!("Dream:  {}\n", d.id));
    if let Some(title) = d.title.as_deref().filter(|t| !t.trim().is_empty()) {
        out.push_str(&format!("Title:  {title}\n"));
    }
    out.push_str(&format!("Date:   {}\n", d.date.format("%Y-%m-%d")));
    out.push_str(&format!("Mood:   {}\n", d.mood));
    out.push_str(&format!(
        "Type:   {}\n",
        if d.is_lucid { "lucid" } else { "normal" }
    ));
    if !d.tags.is_empty() {
        out.push_str(&format!("Tags:   {}\n", hashtags(&d.tags)));
    }
    out.push_str(&format!(
        "Logged: {}\n",
        d.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str("\n--- Dream ---\n");
    out.push_str(&d.content);
    out
}

pub fn format_catalog(catalog: &[TagCount], fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(catalog).unwrap_or_default() + "\n",
        OutputFormat::Text => {
            if catalog.is_empty() {
                return "No tags yet.\n".to_string();
            }
            let mut out = format!("{} tags available\n", catalog.len());
            for t in catalog {
                out.push_str(&format!("  #{} ({})\n", t.tag, t.count));
            }
            out
        }
    }
}

pub fn format_stats(stats: &DreamStats, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(stats).unwrap_or_default() + "\n",
        OutputFormat::Text => format_stats_text(stats),
    }
}

fn format_stats_text(s: &DreamStats) -> String {
    let mut out = String::new();

    out.push_str("Dream Statistics\n");
    out.push_str("================\n");
    out.push_str(&format!("Total dreams:    {}\n", s.total_count));
    out.push_str(&format!(
        "Lucid dreams:    {} ({}%)\n",
        s.lucid_count, s.lucid_percentage
    ));
    out.push_str(&format!(
        "Normal dreams:   {} ({}%)\n",
        s.normal_count, s.normal_percentage
    ));
    if let Some(mood) = s.most_common_mood {
        out.push_str(&format!("Common mood:     {mood}\n"));
    }
    out.push_str(&format!("Dreams per week: {}\n", s.average_dreams_per_week));
    out.push_str(&format!("Unique tags:     {}\n", s.unique_tag_count));
    out.push('\n');

    out.push_str("Moods:\n");
    for m in s.moods_by_count() {
        out.push_str(&format!("  {}: {} ({}%)\n", m.mood, m.count, m.percentage));
    }

    out.push('\n');
    out.push_str("Most used tags:\n");
    if s.top_tags.is_empty() {
        out.push_str("  (no tags yet)\n");
    }
    for t in &s.top_tags {
        out.push_str(&format!("  #{}: {}\n", t.tag, t.count));
    }
    out
}

pub fn format_cloud(cloud: &TagCloud, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(cloud).unwrap_or_default() + "\n",
        OutputFormat::Text => {
            if cloud.is_empty() {
                return "No tags available.\n".to_string();
            }
            let words: Vec<String> = cloud
                .tags
                .iter()
                .map(|t| match t.tier {
                    CloudTier::Largest => format!("#{}", t.tag.to_uppercase()),
                    CloudTier::Large | CloudTier::Medium => format!("#{}", t.tag),
                    CloudTier::Small | CloudTier::Smallest | CloudTier::Uniform => {
                        format!("#{}", t.tag.to_lowercase())
                    }
                })
                .collect();
            format!("{} tags\n{}\n", cloud.tags.len(), words.join("  "))
        }
    }
}

pub fn format_roles(roles: &[Role], fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => {
            let table: serde_json::Map<String, serde_json::Value> = roles
                .iter()
                .map(|r| {
                    (
                        r.as_str().to_string(),
                        serde_json::to_value(r.permissions()).unwrap_or_default(),
                    )
                })
                .collect();
            serde_json::to_string_pretty(&table).unwrap_or_default() + "\n"
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for role in roles {
                let p = role.permissions();
                let limit = p
                    .max_dreams_per_month
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "unlimited".to_string());
                let flags = [
                    ("manage users", p.can_manage_users),
                    ("manage roles", p.can_manage_roles),
                    ("delete any dream", p.can_delete_any_dream),
                    ("view all stats", p.can_view_all_stats),
                    ("export data", p.can_export_data),
                    ("manage settings", p.can_manage_settings),
                    ("create dreams", p.can_create_dreams),
                    ("edit own dreams", p.can_edit_own_dreams),
                    ("share dreams", p.can_share_dreams),
                    ("advanced stats", p.can_view_advanced_stats),
                    ("premium features", p.can_use_premium_features),
                ];
                let allowed: Vec<&str> = flags
                    .iter()
                    .filter(|(_, on)| *on)
                    .map(|(name, _)| *name)
                    .collect();
                out.push_str(&format!(
                    "{role} (rank {}): {} dreams/month\n",
                    role.rank(),
                    limit
                ));
                if allowed.is_empty() {
                    out.push_str("  (read only)\n");
                } else {
                    out.push_str(&format!("  {}\n", allowed.join(", ")));
                }
            }
            out
        }
    }
}

fn hashtags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn excerpt(content: &str) -> String {
    let line = content.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= EXCERPT_CHARS {
        return line.to_string();
    }
    let cut: String = line.chars().take(EXCERPT_CHARS).collect();
    format!("{cut}\u{2026}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use dreamdiary_core::model::{DreamId, Mood};

    fn entry() -> DreamEntry {
        DreamEntry {
            id: DreamId::from("0123456789abcdef"),
            title: None,
            content: "A very long dream about a lighthouse that kept moving further away every time I walked".into(),
            is_lucid: true,
            mood: Mood::Confused,
            tags: vec!["sea".into(), "light".into()],
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_list_line() {
        let e = entry();
        let out = format_dream_list(&[&e], OutputFormat::Text);
        assert!(out.starts_with("\u{25c6} 01234567 2024-02-29 confused [lucid]"));
        assert!(out.contains("#sea #light"));
        assert!(out.contains('\u{2026}'));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_dream_list(&[], OutputFormat::Text),
            "No dreams recorded yet.\n"
        );
        assert_eq!(format_dream_list(&[], OutputFormat::Json), "[]\n");
    }

    #[test]
    fn test_excerpt_is_char_safe() {
        let long = "ñ".repeat(100);
        assert_eq!(excerpt(&long).chars().count(), EXCERPT_CHARS + 1);
        assert_eq!(excerpt("short\nsecond line"), "short");
    }

    #[test]
    fn test_roles_text() {
        let out = format_roles(&[Role::Guest], OutputFormat::Text);
        assert!(out.starts_with("guest (rank 1): 0 dreams/month"));
        assert!(out.contains("(read only)"));
        let out = format_roles(&[Role::Admin], OutputFormat::Text);
        assert!(out.contains("unlimited"));
    }
}
