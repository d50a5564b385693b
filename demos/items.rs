use argchain::{Command, CommandLineParser, Parameter, Switch};

fn main() {
    let mut verbose: bool = false;

    let parser = CommandLineParser::new("inventory")
        .about("Manage a list of items.")
        .add(
            Parameter::boolean("verbose")
                .short('v')
                .help("Show the resolved commands.")
                .bind(Switch::new(&mut verbose, true)),
        )
        .command(
            Command::new("items")
                .about("Work with the items.")
                .require_sub_execution(true)
                .handler(|_| Ok(()))
                .command(
                    Command::new("add")
                        .about("Add an item.")
                        .add(Parameter::indexed("item").help("The item to add."))
                        .add(
                            Parameter::boolean("force")
                                .short('f')
                                .help("Add the item even if it already exists."),
                        )
                        .add(
                            Parameter::optional("count")
                                .short('c')
                                .help("How many to add."),
                        )
                        .handler(|context| {
                            let count: u32 = context.get("count")?.unwrap_or(1);
                            let item = context.value("item").unwrap_or_default();
                            let force = if context.is_parsed("force") {
                                " (forced)"
                            } else {
                                ""
                            };
                            println!("Added {count} x {item}{force}.");
                            Ok(())
                        }),
                )
                .command(
                    Command::new("remove")
                        .about("Remove items.")
                        .add(Parameter::repeated("item").short('i').help("An item to remove."))
                        .handler(|context| {
                            for item in context.values("item") {
                                println!("Removed {item}.");
                            }
                            Ok(())
                        }),
                ),
        );

    let parsed = parser.parse();

    if verbose {
        println!("Commands: {}", parsed.commands().join(" "));
    }
}
