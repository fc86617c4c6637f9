use std::path::Path;

use serde::Serialize;
use softmap::dispatch::RealmTable;

use crate::{
    app::GlobalOptions,
    commands::common::load_model,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
pub struct RealmEntry {
    pub owner: String,
    pub name: String,
    pub desc: String,
    pub declaring_class: String,
    pub members: Vec<String>,
}

pub fn run(model_path: &Path, class: Option<&str>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let model = load_model(model_path)?;
    let realms = RealmTable::build(&model);

    let entries: Vec<RealmEntry> = realms
        .entries()
        .into_iter()
        .filter(|(_, realm)| class.map_or(true, |c| realm.contains(c)))
        .map(|(location, realm)| RealmEntry {
            owner: location.owner.clone(),
            name: location.name.clone(),
            desc: location.desc.clone(),
            declaring_class: realm.declaring_class.clone(),
            members: realm.members.iter().cloned().collect(),
        })
        .collect();

    print_output(&entries, opts, |entries| {
        let mut tw = TabWriter::new(&[
            ("Owner", Align::Left),
            ("Method", Align::Left),
            ("Declared by", Align::Left),
            ("Members", Align::Right),
        ]);
        for e in entries {
            tw.row(vec![
                e.owner.clone(),
                format!("{}{}", e.name, e.desc),
                e.declaring_class.clone(),
                e.members.len().to_string(),
            ]);
        }
        tw.print();
        println!(
            "\n{} key(s), {} realm(s)",
            entries.len(),
            realms.realm_count()
        );
    })
}
