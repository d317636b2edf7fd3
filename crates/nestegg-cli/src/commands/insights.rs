//! Insight command implementations

use anyhow::Result;
use nestegg_core::{
    db::Database,
    insights,
    models::{InsightType, Priority},
};

fn type_icon(insight_type: InsightType) -> &'static str {
    match insight_type {
        InsightType::Tip => "💡",
        InsightType::Alert => "⚠️ ",
        InsightType::Achievement => "🏆",
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "\x1b[31mhigh\x1b[0m",
        Priority::Medium => "\x1b[33mmedium\x1b[0m",
        Priority::Low => "low",
    }
}

pub fn cmd_insights_list(db: &Database, unread: bool, limit: usize, by_priority: bool) -> Result<()> {
    let all = db.list_insights()?;
    let pool = if unread {
        insights::unread_insights(&all)
    } else {
        all
    };

    let shown = if by_priority {
        let mut ranked = insights::prioritized_insights(&pool);
        ranked.truncate(limit);
        ranked
    } else {
        insights::rank_insights(&pool, limit)
    };

    if shown.is_empty() {
        if unread {
            println!("✅ No unread insights. You're all caught up!");
        } else {
            println!("No insights yet.");
        }
        return Ok(());
    }

    println!();
    println!("💬 Insights");
    println!("   ─────────────────────────────────────────────────────────────");

    for insight in &shown {
        let unread_mark = if insight.read { "" } else { " •" };
        println!(
            "   {} {} ({}){}",
            type_icon(insight.insight_type),
            insight.title,
            priority_label(insight.priority),
            unread_mark
        );
        println!("      {}", insight.description);
        println!(
            "      {} · id: {}",
            insight.date.format("%b %d, %Y"),
            insight.id
        );
        println!();
    }

    if insights::has_unread(&shown) {
        println!("   Use 'nestegg insights read <id>' to mark one as read.");
    }

    Ok(())
}

pub fn cmd_insights_read(db: &Database, id: &str) -> Result<()> {
    if db.mark_insight_read(id)? {
        println!("✅ Marked insight {} as read", id);
    } else {
        println!("Insight {} was already read", id);
    }
    Ok(())
}
