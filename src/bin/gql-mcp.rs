use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    gql_mcp::cli::run().await
}
