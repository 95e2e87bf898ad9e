use clap::{Arg, ArgAction, Command as ClapCommand};
use std::process;
use log::error;

use erddapds::utils::logger::Logger;
use erddapds::commands::{CommandFactory, ErddapdsCommandFactory};

fn build_cli() -> ClapCommand {
    let create = ClapCommand::new("create")
        .about("Create new ERDDAP Dataset")
        .arg(Arg::new("dsid").value_name("DATASETID").help("Dataset ID").required(true).index(1))
        .arg(Arg::new("configfile").value_name("CONFIGFILE").help("Config yaml file").required(true).index(2))
        .arg(Arg::new("gdsloc").value_name("GDSLOC").help("GenerateDatasetsXml.sh (Full path)").required(true).index(3))
        .arg(Arg::new("datasetsxml").value_name("DATASETSXML").help("Datasets xml file (Full path)").required(true).index(4))
        .arg(Arg::new("bpd").value_name("BIGPARENTDIRECTORY").help("Path to Big Parent Directory").required(true).index(5))
        .arg(Arg::new("datadir").value_name("DATADIRECTORY").help("Data Directory").required(true).index(6))
        .arg(
            Arg::new("dataset-type")
                .long("dataset-type")
                .help("ERDDAP dataset type passed to the generator")
                .value_name("TYPE")
                .default_value("EDDTableFromNcCFFiles"),
        )
        .arg(
            Arg::new("infourl")
                .long("infourl")
                .help("infoUrl")
                .value_name("INFOURL")
                .default_value("http://example.com"),
        )
        .arg(
            Arg::new("institution")
                .long("institution")
                .help("institution")
                .value_name("INSTITUTION")
                .default_value("Some Organization"),
        )
        .arg(
            Arg::new("summary")
                .long("summary")
                .help("summary")
                .value_name("SUMMARY")
                .default_value("This is some data"),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .help("title")
                .value_name("TITLE")
                .default_value("NETCDF File"),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .help("Also write the patched descriptor to DIR/<DATASETID>.xml")
                .value_name("DIR")
                .required(false),
        );

    let patch = ClapCommand::new("patch")
        .about("Patch an already generated dataset fragment")
        .arg(Arg::new("dsid").value_name("DATASETID").help("Dataset ID").required(true).index(1))
        .arg(Arg::new("configfile").value_name("CONFIGFILE").help("Config yaml file").required(true).index(2))
        .arg(Arg::new("fragment").value_name("FRAGMENT").help("Generated dataset fragment").required(true).index(3))
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file (defaults to stdout)")
                .value_name("FILE")
                .required(false),
        );

    let update = ClapCommand::new("update")
        .about("Updates ERDDAP Dataset")
        .arg(Arg::new("dsid").value_name("DATASETID").help("Dataset ID").required(true).index(1))
        .arg(Arg::new("bpd").value_name("BIGPARENTDIRECTORY").help("Path to Big Parent Directory").required(true).index(2))
        .arg(Arg::new("datadir").value_name("DATADIRECTORY").help("Data Directory").required(true).index(3))
        .arg(
            Arg::new("newnc")
                .value_name("NEWNCFILE")
                .help("New NetCDF File(s) to be added (full path)")
                .required(true)
                .num_args(1..)
                .index(4),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config yaml file, used to check new files against fileNameRegex")
                .value_name("CONFIGFILE")
                .required(false),
        );

    ClapCommand::new("erddapds")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate ERDDAP datasets and integrate them into datasets.xml")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Operation log file")
                .value_name("FILE")
                .global(true)
                .default_value("erddapds.log"),
        )
        .subcommand(create)
        .subcommand(patch)
        .subcommand(update)
}

fn main() {
    let matches = build_cli().get_matches();

    Logger::init_global_logger(matches.get_flag("verbose"));

    let log_file = matches
        .get_one::<String>("log-file")
        .map(String::as_str)
        .unwrap_or("erddapds.log");
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    let factory = ErddapdsCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::build_cli;

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_update_accepts_several_files() {
        let matches = build_cli()
            .try_get_matches_from(["erddapds", "update", "ds", "/bpd", "/data", "a.nc", "b.nc"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "update");
        assert_eq!(sub.get_many::<String>("newnc").unwrap().count(), 2);
    }
}
