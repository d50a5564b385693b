use argchain::{Collection, CommandLineParser, Parameter, Scalar, Switch};
use std::path::PathBuf;

fn main() {
    let mut dry_run: bool = false;
    let mut target: PathBuf = PathBuf::default();
    let mut sources: Vec<PathBuf> = Vec::default();

    let parser = CommandLineParser::new("copy")
        .about("Copy the sources into the target directory.")
        .indexed_first(true)
        .add(
            Parameter::indexed("target")
                .help("The target directory.")
                .bind(Scalar::new(&mut target)),
        )
        .add(
            Parameter::boolean("dry-run")
                .short('n')
                .help("Only show what would be copied.")
                .bind(Switch::new(&mut dry_run, true)),
        )
        .add(
            Parameter::variadic("sources")
                .help("The files to copy.")
                .bind(Collection::new(&mut sources)),
        );

    parser.parse();

    for source in &sources {
        let verb = if dry_run { "Would copy" } else { "Copying" };
        println!("{verb} {} -> {}", source.display(), target.display());
    }
}
