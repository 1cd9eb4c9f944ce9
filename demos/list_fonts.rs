use clap::Parser;
use fontmgr::{FontStyle, FontWeight, LegacyStyle, StyleSet};
use std::env;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "List the families known to the default font manager",
    long_about = None
)]
struct Args {
    /// Only show families whose name contains this text
    #[arg(long)]
    filter: Option<String>,

    /// Show every style in each family
    #[arg(long, default_value_t = false)]
    styles: bool,

    /// Find a typeface covering this character
    #[arg(long)]
    character: Option<char>,

    /// Preferred locales (BCP-47) for the character lookup
    #[arg(long, value_delimiter = ',')]
    locales: Vec<String>,

    /// Try to load this font file
    #[arg(long)]
    load: Option<PathBuf>,
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "fontmgr=info");
        }
    }
    env_logger::init();

    let args = Args::parse();
    let manager = fontmgr::ref_default();
    println!(
        "Backend: {} ({} families)",
        manager.backend_name(),
        manager.count_families()
    );

    for index in 0..manager.count_families() {
        let name = manager.family_name(index);
        if let Some(filter) = &args.filter
            && !name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        let set = manager.create_style_set(index);
        println!("{} ({} styles)", name, set.count());
        if args.styles {
            for style_index in 0..set.count() {
                let (style, style_name) = set.style(style_index);
                println!(
                    "    {:<40} weight {} {:?} {:?}",
                    style_name.unwrap_or_default(),
                    style.weight.numeric_value(),
                    style.width,
                    style.slant
                );
            }
        }
    }

    if let Some(ch) = args.character {
        let locales: Vec<&str> = args.locales.iter().map(String::as_str).collect();
        match manager.match_family_style_character(None, &FontStyle::normal(), &locales, ch) {
            Some(face) => println!(
                "U+{:04X} -> {} {:?}",
                ch as u32,
                face.family_name(),
                face.style()
            ),
            None => println!("U+{:04X} -> no typeface covers it", ch as u32),
        }
    }

    if let Some(path) = args.load {
        match manager.create_from_file(Some(&path), 0) {
            Some(face) => {
                println!(
                    "Loaded {}: {} {:?}",
                    path.display(),
                    face.family_name(),
                    face.style()
                );
                let bold_style = FontStyle {
                    weight: FontWeight::Bold,
                    ..face.style()
                };
                let bold = manager.match_face_style(&face, &bold_style).or_else(|| {
                    manager.legacy_create_typeface(Some(face.family_name()), LegacyStyle::BOLD)
                });
                if let Some(bold) = bold {
                    println!("  bold sibling: {:?}", bold.postscript_name());
                }
            }
            None => println!("Could not load {}", path.display()),
        }
    }
}
