use argchain::{Command, CommandLineParser, Parameter, TimeSpan};
use std::time::Duration;

fn main() {
    let mut window: Duration = Duration::from_secs(3600);

    let parser = CommandLineParser::new("report")
        .about("Summarize recent activity.")
        .use_assignment(false)
        .exec_all_handlers(true)
        .command(
            Command::new("activity")
                .about("Report on activity.")
                .add(
                    Parameter::optional("window")
                        .short('w')
                        .help("How far back to look (ex: 90m, 1h30m).")
                        .bind(TimeSpan::new(&mut window)),
                )
                .add(Parameter::repeated("user").short('u').help("Only include this user."))
                .handler(|context| {
                    let users = context.values("user");

                    if users.is_empty() {
                        println!("Including every user.");
                    } else {
                        println!("Including: {}.", users.join(", "));
                    }

                    Ok(())
                })
                .command(
                    Command::new("show")
                        .about("Print the report.")
                        .add(Parameter::boolean("json"))
                        .add(Parameter::boolean("csv"))
                        .exclusive(["json", "csv"])
                        .handler(|context| {
                            let format = if context.is_parsed("json") {
                                "json"
                            } else if context.is_parsed("csv") {
                                "csv"
                            } else {
                                "text"
                            };
                            println!("Format: {format}.");
                            Ok(())
                        }),
                ),
        );

    parser.parse();
    println!("Window: {window:?}.");
}
