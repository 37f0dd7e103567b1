use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ApiRequest, NodeEndpoint, RemoteResponse};

/// 节点控制 API 客户端 Trait
///
/// 服务层只依赖此 trait；生产实现为 [`HttpControlClient`](crate::HttpControlClient)，
/// 测试中可替换为脚本化的 mock。
#[async_trait]
pub trait ControlClient: Send + Sync {
    /// 发起一次调用
    ///
    /// 任何格式良好的响应（无论 `code`）都返回 `Ok`；
    /// 传输失败与畸形响应返回对应的 [`ClientError`](crate::ClientError)。
    async fn call(&self, node: &NodeEndpoint, request: ApiRequest) -> Result<RemoteResponse>;
}
