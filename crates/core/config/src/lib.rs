use cached::proc_macro::cached;
use config::{Config, File, FileFormat};
use futures_locks::RwLock;
use once_cell::sync::Lazy;
use serde::Deserialize;

static CONFIG_BUILDER: Lazy<RwLock<Config>> = Lazy::new(|| {
    RwLock::new({
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../Haven.toml"),
            FileFormat::Toml,
        ));

        if std::path::Path::new("Haven.toml").exists() {
            builder = builder.add_source(File::new("Haven.toml", FileFormat::Toml));
        }

        builder.build().unwrap()
    })
});

#[derive(Deserialize, Debug, Clone)]
pub struct Database {
    pub mongodb: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Api {
    pub ws: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Files {
    pub upload_dir: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DirectoryEntry {
    pub region: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Directory {
    pub coordinators: Vec<DirectoryEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub database: Database,
    pub api: Api,
    pub files: Files,
    pub directory: Directory,
}

pub async fn init() {
    println!(
        ":: Haven Configuration ::\n\x1b[32m{:?}\x1b[0m",
        config().await
    );
}

pub async fn read() -> Config {
    CONFIG_BUILDER.read().await.clone()
}

#[cached(time = 30)]
pub async fn config() -> Settings {
    read().await.try_deserialize::<Settings>().unwrap()
}

#[cfg(feature = "test")]
#[cfg(test)]
mod tests {
    use crate::config;

    #[async_std::test]
    async fn it_works() {
        let settings = config().await;
        assert!(!settings.directory.coordinators.is_empty());
    }
}
