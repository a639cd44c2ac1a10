use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use formattable_content::content::{
    BlockVariant, CommentContent, ContentGroup, FormattableContent, GroupKind,
};
use formattable_content::render::StyledText;
use formattable_content::{Config, Notification, NotificationContentFactory};
use serde_json::Value;
use tracing::info;

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Inspect notes API JSON as formattable content.
        cmd formattable {
            /// TOML configuration file.
            optional -c, --config path: PathBuf

            /// Print the content groups of each notification.
            cmd groups {
                required path: PathBuf
            }
            /// Print each block's text with its styled runs.
            cmd render {
                required path: PathBuf
            }
            /// Print the action states of each body block.
            cmd actions {
                required path: PathBuf
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let flags = flags::Formattable::from_env_or_exit();
    let config = Config::load_or_default(flags.config.as_deref())?;
    let factory = NotificationContentFactory::new(config.parse.clone());

    match flags.subcommand {
        flags::FormattableCmd::Groups(cmd) => {
            for note in load_notes(&cmd.path)? {
                print_groups(&note, &factory);
            }
        }
        flags::FormattableCmd::Render(cmd) => {
            for note in load_notes(&cmd.path)? {
                print_rendered(&note, &factory, &config);
            }
        }
        flags::FormattableCmd::Actions(cmd) => {
            for note in load_notes(&cmd.path)? {
                print_actions(&note, &factory);
            }
        }
    }

    Ok(())
}

/// Accepts either a single note or a `{"notes": [...]}` response.
fn load_notes(path: &Path) -> Result<Vec<Notification>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("unable to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let notes = if value.get("notes").is_some() {
        Notification::list_from_json(&text)?
    } else {
        vec![Notification::from_value(value)?]
    };
    info!(count = notes.len(), path = %path.display(), "loaded notifications");
    Ok(notes)
}

fn print_groups(note: &Notification, factory: &NotificationContentFactory) {
    println!("note {} ({:?})", note.id, note.kind());
    let groups = note
        .subject_group(factory)
        .into_iter()
        .chain(note.header_and_body_groups(factory));
    for group in groups {
        print_group(&group);
    }
}

fn print_group(group: &ContentGroup) {
    println!("  [{}]", group.kind());
    for block in group.blocks() {
        let media = block.body().map_or(0, |body| body.media().len());
        println!(
            "    {}: {:?} ({} ranges, {} media)",
            block.kind(),
            block.text().unwrap_or_default(),
            block.ranges().len(),
            media
        );
    }
}

fn print_rendered(note: &Notification, factory: &NotificationContentFactory, config: &Config) {
    println!("note {}", note.id);
    if let Some(subject) = note.subject_group(factory) {
        for styled in StyledText::render_group(&subject, &config.render) {
            println!("  subject: {}", styled.snippet(config.render.snippet_words));
        }
    }
    for group in note.header_and_body_groups(factory) {
        for styled in StyledText::render_group(&group, &config.render) {
            println!("  [{}] {:?}", group.kind(), styled.text);
            for run in &styled.runs {
                let url = run.url.as_deref().unwrap_or("-");
                println!("    {} {:?} {:?} {}", run.kind, run.range, styled.slice(run), url);
            }
        }
    }
}

fn print_actions(note: &Notification, factory: &NotificationContentFactory) {
    println!("note {}", note.id);
    // Comment blocks with actions are repeated in their actions group.
    for group in note.body_groups(factory) {
        if group.kind() == &GroupKind::COMMENT {
            continue;
        }
        for block in group.blocks() {
            let Some(actions) = block.actions() else {
                continue;
            };
            println!("  [{}] {}", group.kind(), block.kind());
            for action in actions {
                println!(
                    "    {} enabled={} on={}",
                    action.identifier, action.enabled, action.on
                );
            }
            if let Some(comment) = CommentContent::from_block(block) {
                println!("    approved={}", comment.is_comment_approved());
            }
        }
    }
}
