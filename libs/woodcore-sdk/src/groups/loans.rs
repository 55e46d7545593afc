use crate::endpoint::endpoint_group;

endpoint_group! {
    /// Loan applications, disbursement, repayment and write-off.
    pub struct Loans;
    table LOAN_ENDPOINTS;

    /// Compute the schedule, interest and charges of a prospective loan.
    fn calculate_loan => POST "/loans/calculate",
        body [
            "clientId",
            "productId",
            "principal",
            "duration",
            "durationBy",
            "numberOfRepayments",
            "repaymentEvery",
            "repaymentFrequency",
            "interestRate",
            "interestType",
            "expectedDisbursementDate",
            "createdDate",
            "linkDepositAccountId",
        ];
    /// Submit a loan application.
    fn create_loan_account => POST "/loans",
        body [
            "clientId",
            "productId",
            "principal",
            "loanType",
            "numberOfRepayments",
            "repaymentEvery",
            "repaymentFrequency",
            "interestRate",
            "interestType",
            "interestCalculationPeriodType",
            "transactionProcessingStrategyId",
            "expectedDisbursementDate",
            "createdDate",
            "linkDepositAccountId",
        ];
    /// Approve a pending loan application.
    fn approve_loan_account => POST "/loans/{loanAccountId}/approve",
        body ["approvedOnDate", "expectedDisbursementDate", "comment"];
    /// Undo a loan approval. The API expects `command=undoapproval`.
    fn undo_approval_for_loan_account => POST "/loans/{loanAccountId}",
        query ["command"],
        body ["comment"];
    /// Disburse an approved loan.
    fn disburse_loan => POST "/loans/{loanAccountId}/disburse",
        body ["disbursementDate", "transactionAmount", "bankName", "referenceNumber", "comment"];
    /// Disburse an approved loan into its linked deposit account.
    fn disburse_loan_to_savings => POST "/loans/{loanAccountId}/disbursetosavings",
        body ["disbursementDate", "bankName", "referenceNumber", "transactionAmount", "comment"];
    /// Reverse a disbursal.
    fn undo_disburse_loan => POST "/loans/{loanAccountId}/undodisburse",
        body ["comment"];
    /// List loan accounts, optionally filtered.
    fn retrieve_all_loan_accounts, pages retrieve_all_loan_account_pages => GET "/loans",
        query ["status", "perPage", "page", "sortBy", "orderBy", "officeId", "accountNo"];
    /// Retrieve one loan account.
    fn retrieve_loan_account => GET "/loans/{loanAccountId}";
    /// Record a repayment.
    fn make_repayment_for_loan => POST "/loans/{loanAccountId}/repayment",
        body ["transactionAmount", "transactionDate", "paymentTypeId", "comment"];
    /// Close an active loan early.
    fn foreclosure_of_an_active_loan => POST "/loans/{loanAccountId}/foreclosure",
        body ["transactionDate", "locale", "dateFormat", "comment"];
    /// Waive interest due on a loan.
    fn waive_interest_on_loan_account => POST "/loans/{loanAccountId}/waiveInterest",
        body ["transactionDate", "transactionAmount", "locale", "dateFormat", "comment"];
    /// Write off a loan.
    fn write_off_loan => POST "/loans/{loanAccountId}/writeoff",
        body ["transactionDate", "comment"];
    /// Reverse a write-off.
    fn undo_write_off_for_loan => POST "/loans/{loanAccountId}/undowriteoff";
    /// List the transactions of a loan account.
    fn get_all_loan_account_transactions, pages loan_account_transaction_pages =>
        GET "/loans/{loanAccountId}/transactions",
        query ["perPage", "page"];
    /// Retrieve one loan transaction.
    fn retrieve_loan_account_transaction =>
        GET "/loans/{loanAccountId}/transactions/{transactionId}";
}
