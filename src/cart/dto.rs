use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    #[serde(default, rename = "nftId")]
    pub nft_id: Option<String>,
}
