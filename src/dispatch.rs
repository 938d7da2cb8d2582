use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

use crate::{
    Result,
    config::MonitorConfig,
    fetch::{Fetcher, fetch_and_parse},
    hls::PlaylistKind,
    logging::{LogRecord, LogSink},
    monitor::{VariantMonitor, interval_ticker},
};

/// Resolve the renditions to monitor for a stream URL.
///
/// A master playlist yields every listed variant; a variant playlist yields
/// the URL itself.
pub async fn discover_renditions(fetcher: &dyn Fetcher, url: &Url) -> Result<Vec<Url>> {
    let playlist = fetch_and_parse(fetcher, url).await?;

    Ok(match playlist.kind {
        PlaylistKind::Master => playlist.streams().map(|s| s.url.clone()).collect(),
        PlaylistKind::Variant => vec![url.clone()],
    })
}

/// Starts one monitor per rendition of a stream.
pub struct Dispatcher {
    config: MonitorConfig,
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn LogSink>,
}

impl Dispatcher {
    pub fn new(config: MonitorConfig, fetcher: Arc<dyn Fetcher>, sink: Arc<dyn LogSink>) -> Self {
        Self {
            config,
            fetcher,
            sink,
        }
    }

    /// Build the monitor for one rendition.
    pub fn monitor(&self, url: Url) -> VariantMonitor {
        VariantMonitor::new(
            url,
            self.fetcher.clone(),
            self.sink.clone(),
            self.config.retry.clone(),
        )
    }

    /// Classify `url` and spawn a polling task for each rendition.
    pub async fn start(&self, url: &Url) -> Result<Vec<JoinHandle<VariantMonitor>>> {
        let renditions = discover_renditions(self.fetcher.as_ref(), url).await?;

        self.sink.emit(
            LogRecord::info("Discovered renditions")
                .with_field("url", url)
                .with_field("count", renditions.len()),
        );

        Ok(renditions
            .into_iter()
            .map(|rendition| {
                self.monitor(rendition)
                    .spawn(interval_ticker(self.config.poll_interval))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fetch::mock::{Scripted, ScriptedFetcher},
        logging::MemorySink,
    };

    const MASTER: &str = "https://cdn.example.com/live/master.m3u8";

    #[tokio::test]
    async fn test_master_yields_each_variant() {
        let fetcher = ScriptedFetcher::new();
        fetcher.push(
            MASTER,
            Scripted::ok(
                "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=500000\nlow.m3u8\n#EXT-X-STREAM-INF:BANDWIDTH=900000\nhttps://mirror.example.com/high.m3u8\n",
            ),
        );

        let renditions = discover_renditions(&fetcher, &Url::parse(MASTER).unwrap())
            .await
            .unwrap();
        let renditions: Vec<&str> = renditions.iter().map(Url::as_str).collect();

        assert_eq!(
            renditions,
            vec![
                "https://cdn.example.com/live/low.m3u8",
                "https://mirror.example.com/high.m3u8"
            ]
        );
    }

    #[tokio::test]
    async fn test_variant_yields_itself() {
        let url = "https://cdn.example.com/live/index.m3u8";
        let fetcher = ScriptedFetcher::new();
        fetcher.push(url, Scripted::ok("#EXTM3U\n#EXTINF:2,\nseg1.ts\n"));

        let renditions = discover_renditions(&fetcher, &Url::parse(url).unwrap())
            .await
            .unwrap();
        assert_eq!(renditions, vec![Url::parse(url).unwrap()]);
    }

    #[tokio::test]
    async fn test_start_fails_on_unreachable_stream() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.push(MASTER, Scripted::Transport);

        let dispatcher = Dispatcher::new(
            MonitorConfig::default(),
            fetcher,
            Arc::new(MemorySink::new()),
        );
        let Err(err) = dispatcher.start(&Url::parse(MASTER).unwrap()).await else {
            panic!("unreachable stream started monitors");
        };
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn test_start_spawns_one_monitor_per_rendition() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.push(
            MASTER,
            Scripted::ok(
                "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=1\na.m3u8\n#EXT-X-STREAM-INF:BANDWIDTH=2\nb.m3u8\n#EXT-X-STREAM-INF:BANDWIDTH=3\nc.m3u8\n",
            ),
        );
        let sink = Arc::new(MemorySink::new());

        let dispatcher = Dispatcher::new(MonitorConfig::default(), fetcher, sink.clone());
        let handles = dispatcher
            .start(&Url::parse(MASTER).unwrap())
            .await
            .unwrap();

        assert_eq!(handles.len(), 3);
        assert_eq!(sink.records()[0].field("count"), Some("3"));
        for handle in handles {
            handle.abort();
        }
    }
}
