// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

/// 单次状态检查的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus<T> {
    /// 尚未到达终态，继续轮询
    Pending,
    /// 成功终态
    Ready(T),
    /// 失败终态，立即停止
    Failed(String),
}

/// 轮询错误类型
#[derive(Error, Debug)]
pub enum PollError<E> {
    /// 检查返回失败终态
    #[error("terminal failure on attempt {attempt}: {reason}")]
    Failed { attempt: u32, reason: String },
    /// 次数耗尽仍未到达终态
    #[error("no terminal state after {attempts} attempts")]
    Exhausted { attempts: u32 },
    /// 检查本身出错（网络等）
    #[error(transparent)]
    Check(E),
}

/// 轮询策略配置
///
/// 先检查再等待，`max_attempts` 次检查之间最多等待 `max_attempts - 1` 个间隔
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// 最大检查次数
    pub max_attempts: u32,
    /// 两次检查之间的间隔
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            interval: Duration::from_secs(5),
        }
    }
}

impl PollPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// 整个轮询可能占用的最长等待时间
    pub fn max_wait(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }

    /// 执行轮询
    ///
    /// # 参数
    ///
    /// * `check` - 接收当前尝试序号（从1开始）的状态检查
    ///
    /// # 返回值
    ///
    /// * `Ok(T)` - 检查返回 `Ready`
    /// * `Err(PollError)` - 失败终态、检查出错或次数耗尽
    pub async fn run<T, E, F, Fut>(&self, mut check: F) -> Result<T, PollError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<PollStatus<T>, E>>,
    {
        for attempt in 1..=self.max_attempts {
            match check(attempt).await.map_err(PollError::Check)? {
                PollStatus::Ready(value) => return Ok(value),
                PollStatus::Failed(reason) => return Err(PollError::Failed { attempt, reason }),
                PollStatus::Pending => {
                    if attempt < self.max_attempts {
                        sleep(self.interval).await;
                    }
                }
            }
        }

        Err(PollError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
