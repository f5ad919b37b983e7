use placescout_core::{mask_credential, CredentialStore};

pub(crate) fn run_key_set(store: &impl CredentialStore, key: &str) -> anyhow::Result<()> {
    store.save(key)?;
    println!("API key saved successfully!");
    Ok(())
}

pub(crate) fn run_key_show(store: &impl CredentialStore) -> anyhow::Result<()> {
    match store.get()? {
        Some(key) => println!("{}", mask_credential(&key)),
        None => println!("no API key set; run `placescout key set <KEY>`"),
    }
    Ok(())
}

pub(crate) fn run_key_clear(store: &impl CredentialStore) -> anyhow::Result<()> {
    store.clear()?;
    println!("API key cleared");
    Ok(())
}
