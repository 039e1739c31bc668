/*
[INPUT]:  Parsed subcommands and AppConfig from main
[OUTPUT]: Terminal front-ends for each subcommand
[POS]:    CLI layer
[UPDATE]: When adding a subcommand
*/

pub mod admin;
pub mod init;
pub mod listing;
pub mod take;
pub mod trigger;
