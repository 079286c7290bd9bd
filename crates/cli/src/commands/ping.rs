use lilyhook_client::{ComponentTree, Container, MessageParts, TextBlock, WebhookClient};

use super::print_results;
use crate::OutputFormat;

pub async fn run(client: &WebhookClient, format: &OutputFormat) -> anyhow::Result<()> {
    let mut tree = ComponentTree::new();
    tree.add(Container::new().add(TextBlock::new("Hello")));

    let parts = MessageParts {
        components: Some(&tree),
        ..Default::default()
    };
    let results = client.send(parts, None).await?;
    print_results(&results, format)
}
